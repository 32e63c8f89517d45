//! Error types for archive persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors that can occur while loading or persisting the archive.
///
/// Every variant is fatal to the run: losing a write here silently would
/// break resumability.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to read archive at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write archive at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("archive at {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize archive record: {0}")]
    Serialize(#[from] serde_json::Error),
}
