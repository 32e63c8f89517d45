//! Shared data models for the varc shot archiver.
//!
//! This crate provides Serde-serializable types for:
//! - Manifest-derived videos and their detected shots
//! - Archive items and the resumable archive record
//! - Source label normalization

pub mod record;
pub mod shot;
pub mod source_label;
pub mod video;

// Re-export common types
pub use record::{ArchiveRecord, Item};
pub use shot::Shot;
pub use source_label::SourceLabel;
pub use video::{Video, VideoId};
