//! Shot archiving pipeline worker.
//!
//! Sequences the whole run: manifest loading and validation, per-video
//! scene segmentation, per-shot extraction and classification, and the
//! incremental archive record.

pub mod config;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod progress;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use pipeline::{Pipeline, RunSummary};
pub use progress::{NoopProgress, ProgressObserver, TracingProgress};
