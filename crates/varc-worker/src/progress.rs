//! Progress observation.
//!
//! The pipeline reports work through this narrow interface; how it is
//! rendered (console, logs, nothing) stays outside the core.

use tracing::info;

use varc_models::Video;

/// Receives pipeline lifecycle events. All methods default to no-ops so
/// observers implement only what they care about.
pub trait ProgressObserver: Send + Sync {
    fn run_started(&self, _videos: usize) {}

    fn video_started(&self, _video: &Video) {}

    fn shots_planned(&self, _video: &Video, _count: usize) {}

    fn shot_completed(&self, _video: &Video, _ordinal: u32, _total: usize, _category: Option<&str>) {
    }

    fn video_completed(&self, _video: &Video) {}

    fn run_completed(&self, _videos: usize, _shots: usize) {}
}

/// Observer that ignores everything. Used in tests and as the default.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {}

/// Observer that narrates progress through `tracing`.
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn run_started(&self, videos: usize) {
        info!(videos, "Processing {} videos", videos);
    }

    fn video_started(&self, video: &Video) {
        info!(video = %video.filename, id = %video.id, "Processing video");
    }

    fn shots_planned(&self, video: &Video, count: usize) {
        info!(video = %video.filename, shots = count, "Processing {} shots from {}", count, video.filename);
    }

    fn shot_completed(&self, video: &Video, ordinal: u32, total: usize, category: Option<&str>) {
        info!(
            video = %video.filename,
            shot = ordinal + 1,
            total,
            category = category.unwrap_or(""),
            "Shot archived"
        );
    }

    fn video_completed(&self, video: &Video) {
        info!(video = %video.filename, "Video complete");
    }

    fn run_completed(&self, videos: usize, shots: usize) {
        info!(videos, shots, "Run complete");
    }
}
