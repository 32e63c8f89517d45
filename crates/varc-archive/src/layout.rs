//! Output path derivation for one source label.

use std::path::{Path, PathBuf};

use varc_models::{SourceLabel, VideoId};

/// File name of the archive record.
const DATA_FILE: &str = "data.json";

/// Directory of retained clip artifacts.
const ITEMS_DIR: &str = "items";

/// Transient per-video working area, removed when its video finishes.
const TMP_DIR: &str = "___tmp";

/// Container format of extracted clips.
const CLIP_EXT: &str = "mp4";

/// Image format of preview frames.
const PREVIEW_EXT: &str = "png";

/// Derives every output path for one source label.
#[derive(Debug, Clone)]
pub struct ArchiveLayout {
    root: PathBuf,
}

impl ArchiveLayout {
    /// Layout rooted at `<output_root>/<label>`.
    pub fn new(output_root: impl AsRef<Path>, label: &SourceLabel) -> Self {
        Self {
            root: output_root.as_ref().join(label.as_str()),
        }
    }

    /// Source-scoped output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the archive record file.
    pub fn data_path(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }

    /// Directory of retained clips.
    pub fn items_dir(&self) -> PathBuf {
        self.root.join(ITEMS_DIR)
    }

    /// Transient preview working area.
    pub fn tmp_dir(&self) -> PathBuf {
        self.root.join(TMP_DIR)
    }

    /// Retained clip path for a shot, keyed by video id and ordinal.
    pub fn clip_path(&self, video_id: &VideoId, ordinal: u32) -> PathBuf {
        self.items_dir()
            .join(format!("{}-{}.{}", video_id, ordinal, CLIP_EXT))
    }

    /// Transient preview path for a shot, keyed by video id and ordinal.
    pub fn preview_path(&self, video_id: &VideoId, ordinal: u32) -> PathBuf {
        self.tmp_dir()
            .join(format!("{}-{}.{}", video_id, ordinal, PREVIEW_EXT))
    }
}
