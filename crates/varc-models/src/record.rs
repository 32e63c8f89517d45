//! Archive record and item models.

use serde::{Deserialize, Serialize};

use crate::shot::Shot;
use crate::video::Video;

/// One processed shot as persisted in the archive.
///
/// The only entity that outlives a run. Field names follow the archive
/// file's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Owning video's run-scoped ID
    pub id: String,
    /// Shot ordinal within the video
    #[serde(rename = "sceneID")]
    pub scene_id: u32,
    /// External source identity of the video
    #[serde(rename = "originalID")]
    pub original_id: String,
    /// Video title
    pub title: String,
    /// Source label from the manifest row
    pub source: String,
    /// Video tags
    pub tags: Vec<String>,
    /// Assigned category, empty when untagged
    pub category: String,
}

impl Item {
    /// Build an item from a shot and its owning video.
    pub fn new(video: &Video, shot: &Shot) -> Self {
        Self {
            id: video.id.to_string(),
            scene_id: shot.ordinal,
            original_id: video.source_id.clone(),
            title: video.title.clone(),
            source: video.source.clone(),
            tags: shot.tags.clone(),
            category: shot.category.clone().unwrap_or_default(),
        }
    }
}

/// The persisted, resumable record of processed shots for one source label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    /// Normalized source label this record belongs to
    pub source: String,
    /// Ordered sequence of processed shots
    pub items: Vec<Item>,
    /// Source identities of videos whose shots all completed.
    ///
    /// This, not mere item presence, is the dedup key: a run interrupted
    /// mid-video leaves its items behind but no completion mark, so the
    /// video is redone in full on the next run. Absent in records written
    /// by older tools, which then deserialize with an empty set.
    #[serde(default)]
    pub completed: Vec<String>,
}

impl ArchiveRecord {
    /// Create an empty record for a source label.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            items: Vec::new(),
            completed: Vec::new(),
        }
    }

    /// Whether a source identity finished every shot in a previous run.
    pub fn is_completed(&self, original_id: &str) -> bool {
        self.completed.iter().any(|id| id == original_id)
    }

    /// Mark a source identity as fully processed.
    pub fn mark_completed(&mut self, original_id: &str) {
        if !self.is_completed(original_id) {
            self.completed.push(original_id.to_string());
        }
    }

    /// Remove items left behind by an interrupted run of this video.
    ///
    /// Returns the number of items removed.
    pub fn prune_items(&mut self, original_id: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.original_id != original_id);
        before - self.items.len()
    }
}
