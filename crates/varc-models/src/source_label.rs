//! Source label normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized identifier of a manifest's originating directory.
///
/// Namespaces all output for one source: `output/<label>/...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceLabel(String);

impl SourceLabel {
    /// Normalize a directory name into a label.
    ///
    /// Lowercases, then replaces spaces, hyphens, and dots with underscores.
    pub fn from_dir_name(name: &str) -> Self {
        let label = name
            .to_lowercase()
            .replace([' ', '-', '.'], "_");
        Self(label)
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
