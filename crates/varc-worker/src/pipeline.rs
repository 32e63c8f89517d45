//! Pipeline orchestrator.
//!
//! Strictly sequential: one video at a time, one shot at a time within a
//! video. Each shot is persisted before the next starts, so a crash loses
//! at most the in-flight shot.

use tokio::fs;
use tracing::{info, warn};

use varc_archive::{ArchiveLayout, ArchiveWriter};
use varc_media::{detect_boundaries, extract_clip, extract_preview, plan_shots};
use varc_models::{Item, Shot, Video};
use varc_tagger::TagClient;

use crate::config::WorkerConfig;
use crate::error::WorkerResult;
use crate::manifest;
use crate::progress::{NoopProgress, ProgressObserver};

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Videos processed this run (skipped rows not counted)
    pub videos: usize,
    /// Shots archived this run
    pub shots: usize,
}

/// Sequences the whole run over one source directory.
pub struct Pipeline {
    config: WorkerConfig,
    tagger: TagClient,
    observer: Box<dyn ProgressObserver>,
}

impl Pipeline {
    /// Create a pipeline for a resolved configuration.
    pub fn new(config: WorkerConfig) -> Self {
        let tagger = TagClient::new(config.endpoint.clone());
        Self {
            config,
            tagger,
            observer: Box::new(NoopProgress),
        }
    }

    /// Install a progress observer.
    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run the pipeline to completion.
    ///
    /// Validation failures abort before any side effects. External-tool
    /// and persistence errors abort mid-run; the archive then holds every
    /// shot that completed before the failure.
    pub async fn run(&self) -> WorkerResult<RunSummary> {
        let layout = ArchiveLayout::new(&self.config.output_root, &self.config.source_label);
        let mut writer = ArchiveWriter::open(&layout, &self.config.source_label).await?;

        let videos = manifest::load_manifest(&self.config.manifest_path, writer.record())?;
        manifest::validate_sources(&self.config.video_dir, &videos)?;

        fs::create_dir_all(layout.items_dir()).await?;

        self.observer.run_started(videos.len());

        let mut shots = 0;
        for video in &videos {
            self.observer.video_started(video);
            shots += self.process_video(video, &layout, &mut writer).await?;
            self.observer.video_completed(video);
        }

        self.observer.run_completed(videos.len(), shots);
        info!(videos = videos.len(), shots, "Archive run finished");

        Ok(RunSummary {
            videos: videos.len(),
            shots,
        })
    }

    /// Process one video inside its transient working area.
    ///
    /// The working area is removed on success and on failure alike; only
    /// the archived clips and `data.json` survive the video.
    async fn process_video(
        &self,
        video: &Video,
        layout: &ArchiveLayout,
        writer: &mut ArchiveWriter,
    ) -> WorkerResult<usize> {
        writer.begin_video(&video.source_id).await?;
        fs::create_dir_all(layout.tmp_dir()).await?;

        let result = self.process_shots(video, layout, writer).await;

        if let Err(e) = fs::remove_dir_all(layout.tmp_dir()).await {
            warn!(error = %e, "Failed to remove transient working area");
        }

        result
    }

    async fn process_shots(
        &self,
        video: &Video,
        layout: &ArchiveLayout,
        writer: &mut ArchiveWriter,
    ) -> WorkerResult<usize> {
        let input = self.config.video_dir.join(&video.filename);

        let boundaries = detect_boundaries(&input).await?;
        let spans = plan_shots(&boundaries);
        self.observer.shots_planned(video, spans.len());

        for (ordinal, span) in spans.iter().enumerate() {
            let ordinal = ordinal as u32;
            let clip_path = layout.clip_path(&video.id, ordinal);
            let preview_path = layout.preview_path(&video.id, ordinal);

            extract_clip(&input, &clip_path, span).await?;
            extract_preview(&input, &preview_path, span).await?;

            let mut shot = Shot::new(video, ordinal, span.start, span.end, clip_path, preview_path);

            // A dead classifier is recoverable: the shot is archived
            // untagged and the run keeps going.
            let preview = fs::read(&shot.preview_path).await?;
            match self.tagger.classify(preview).await {
                Ok(tag) => shot.category = tag,
                Err(e) => {
                    warn!(
                        video = %video.filename,
                        shot = ordinal,
                        error = %e,
                        "Classification unavailable, shot left untagged"
                    );
                }
            }

            writer.append(Item::new(video, &shot)).await?;
            self.observer
                .shot_completed(video, ordinal, spans.len(), shot.category.as_deref());
        }

        writer.mark_completed(&video.source_id).await?;
        Ok(spans.len())
    }
}
