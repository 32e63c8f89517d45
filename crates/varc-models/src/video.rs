//! Manifest-derived video models.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a video within one run.
///
/// Generated fresh per run and independent of the manifest's source
/// identity, so archive artifacts never collide across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Generate a new random video ID (32-char lowercase hex).
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One source video described by a manifest row.
///
/// Lives only for the duration of a run; only the [`Item`](crate::Item)s
/// built from its shots are persisted.
#[derive(Debug, Clone)]
pub struct Video {
    /// Run-scoped unique ID
    pub id: VideoId,
    /// Filename under the source's video directory
    pub filename: String,
    /// External source identity used for deduplication
    pub source_id: String,
    /// Human-readable title
    pub title: String,
    /// Source label as given in the manifest row
    pub source: String,
    /// Tags, already split out of the pipe-delimited manifest field
    pub tags: Vec<String>,
}

impl Video {
    /// Build a video from manifest row fields, generating a fresh ID.
    pub fn from_manifest_row(
        filename: impl Into<String>,
        source_id: impl Into<String>,
        title: impl Into<String>,
        source: impl Into<String>,
        tags_field: &str,
    ) -> Self {
        Self {
            id: VideoId::new(),
            filename: filename.into(),
            source_id: source_id.into(),
            title: title.into(),
            source: source.into(),
            tags: split_tags(tags_field),
        }
    }
}

/// Split a pipe-delimited tag field into individual tags.
///
/// Empty segments are dropped, so an empty field yields no tags.
pub fn split_tags(field: &str) -> Vec<String> {
    field
        .split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
