//! Resumable archive record and output layout.
//!
//! This crate owns everything under `output/<source-label>/`: the
//! deterministic `data.json` archive record, the retained `items/` clips,
//! and the transient `___tmp/` preview area.

pub mod error;
pub mod layout;
pub mod writer;

pub use error::{ArchiveError, ArchiveResult};
pub use layout::ArchiveLayout;
pub use writer::ArchiveWriter;
