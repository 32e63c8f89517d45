//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Manifest parse error: {0}")]
    Manifest(#[from] csv::Error),

    #[error("Media error: {0}")]
    Media(#[from] varc_media::MediaError),

    #[error("Archive error: {0}")]
    Archive(#[from] varc_archive::ArchiveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this error was raised before any side effects.
    pub fn is_pre_run(&self) -> bool {
        matches!(self, WorkerError::Config(_) | WorkerError::Validation(_))
    }
}
