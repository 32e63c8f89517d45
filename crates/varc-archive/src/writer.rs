//! Resumable archive writer.

use serde::Serialize;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

use varc_models::{ArchiveRecord, Item, SourceLabel};

use crate::error::{ArchiveError, ArchiveResult};
use crate::layout::ArchiveLayout;

/// Owns the archive record for one source label and persists it after
/// every mutation.
///
/// The whole record is rewritten on each append, which bounds crash loss
/// to the in-flight shot at the cost of an O(items) rewrite. Writes are
/// deterministic (sorted keys, fixed indentation) so rewriting unchanged
/// content is byte-identical, and go through a temp file plus rename so a
/// crash never leaves a torn `data.json`.
#[derive(Debug)]
pub struct ArchiveWriter {
    record: ArchiveRecord,
    path: PathBuf,
}

impl ArchiveWriter {
    /// Load the persisted record for this layout, or initialize an empty
    /// one if none exists yet.
    pub async fn open(layout: &ArchiveLayout, label: &SourceLabel) -> ArchiveResult<Self> {
        let path = layout.data_path();

        let record = if path.exists() {
            let bytes = fs::read(&path).await.map_err(|source| ArchiveError::Read {
                path: path.clone(),
                source,
            })?;
            let record: ArchiveRecord =
                serde_json::from_slice(&bytes).map_err(|source| ArchiveError::Malformed {
                    path: path.clone(),
                    source,
                })?;
            info!(
                path = %path.display(),
                items = record.items.len(),
                completed = record.completed.len(),
                "Loaded existing archive record"
            );
            record
        } else {
            info!(path = %path.display(), "Starting new archive record");
            ArchiveRecord::new(label.as_str())
        };

        Ok(Self { record, path })
    }

    /// The in-memory record, always equal to what is on disk.
    pub fn record(&self) -> &ArchiveRecord {
        &self.record
    }

    /// Whether this source identity completed in a previous run.
    pub fn is_completed(&self, original_id: &str) -> bool {
        self.record.is_completed(original_id)
    }

    /// Prepare to (re)process a video: drop items a previously interrupted
    /// run left behind for this source identity, so the redo cannot
    /// duplicate shots. Persists only when something was pruned.
    pub async fn begin_video(&mut self, original_id: &str) -> ArchiveResult<usize> {
        let pruned = self.record.prune_items(original_id);
        if pruned > 0 {
            info!(
                original_id,
                pruned, "Pruned stale items from an interrupted earlier run"
            );
            self.persist().await?;
        }
        Ok(pruned)
    }

    /// Append one item and persist the record.
    pub async fn append(&mut self, item: Item) -> ArchiveResult<()> {
        self.record.items.push(item);
        self.persist().await
    }

    /// Mark a source identity fully processed and persist the record.
    pub async fn mark_completed(&mut self, original_id: &str) -> ArchiveResult<()> {
        self.record.mark_completed(original_id);
        self.persist().await
    }

    /// Serialize the whole record and atomically replace `data.json`.
    async fn persist(&self) -> ArchiveResult<()> {
        let bytes = to_canonical_json(&self.record)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| ArchiveError::Write {
                    path: self.path.clone(),
                    source,
                })?;
        }

        // Temp file lands in the same directory so the rename is atomic.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)
            .await
            .map_err(|source| ArchiveError::Write {
                path: tmp.clone(),
                source,
            })?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| ArchiveError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = %self.path.display(),
            items = self.record.items.len(),
            "Archive record persisted"
        );
        Ok(())
    }
}

/// Serialize a record deterministically: sorted object keys, 4-space
/// indentation. Repeated serialization of equal records is byte-identical.
pub fn to_canonical_json(record: &ArchiveRecord) -> ArchiveResult<Vec<u8>> {
    // Round-trip through Value: its object maps are ordered by key.
    let value = serde_json::to_value(record)?;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use varc_models::{Shot, Video};

    fn sample_item(original_id: &str, ordinal: u32) -> Item {
        let video = Video::from_manifest_row("a.mp4", original_id, "Title", "Source A", "t1|t2");
        let shot = Shot::new(&video, ordinal, 1.5, 4.0, "c.mp4".into(), "p.png".into());
        Item::new(&video, &shot)
    }

    async fn open_writer(dir: &TempDir) -> (ArchiveWriter, ArchiveLayout, SourceLabel) {
        let label = SourceLabel::from_dir_name("Source A");
        let layout = ArchiveLayout::new(dir.path(), &label);
        let writer = ArchiveWriter::open(&layout, &label).await.unwrap();
        (writer, layout, label)
    }

    #[tokio::test]
    async fn test_open_initializes_empty_record() {
        let dir = TempDir::new().unwrap();
        let (writer, _, _) = open_writer(&dir).await;
        assert_eq!(writer.record().source, "source_a");
        assert!(writer.record().items.is_empty());
    }

    #[tokio::test]
    async fn test_append_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let (mut writer, layout, _) = open_writer(&dir).await;

        writer.append(sample_item("src-1", 0)).await.unwrap();

        let on_disk = fs::read(layout.data_path()).await.unwrap();
        assert_eq!(on_disk, to_canonical_json(writer.record()).unwrap());
    }

    #[tokio::test]
    async fn test_reload_round_trips_byte_identically() {
        let dir = TempDir::new().unwrap();
        let (mut writer, layout, label) = open_writer(&dir).await;
        writer.append(sample_item("src-1", 0)).await.unwrap();
        writer.mark_completed("src-1").await.unwrap();

        let first = fs::read(layout.data_path()).await.unwrap();

        let reloaded = ArchiveWriter::open(&layout, &label).await.unwrap();
        assert_eq!(to_canonical_json(reloaded.record()).unwrap(), first);
    }

    #[tokio::test]
    async fn test_canonical_json_sorts_keys() {
        let mut record = ArchiveRecord::new("source_a");
        record.items.push(sample_item("src-1", 0));
        let text = String::from_utf8(to_canonical_json(&record).unwrap()).unwrap();

        let completed = text.find("\"completed\"").unwrap();
        let items = text.find("\"items\"").unwrap();
        let source = text.rfind("\"source\"").unwrap();
        assert!(completed < items && items < source);
        assert!(text.contains("\n    \"items\""));
    }

    #[tokio::test]
    async fn test_begin_video_prunes_stale_items() {
        let dir = TempDir::new().unwrap();
        let (mut writer, layout, label) = open_writer(&dir).await;

        // Interrupted earlier run: items present, no completion mark.
        writer.append(sample_item("src-1", 0)).await.unwrap();
        writer.append(sample_item("src-1", 1)).await.unwrap();
        writer.append(sample_item("src-2", 0)).await.unwrap();
        writer.mark_completed("src-2").await.unwrap();

        let mut resumed = ArchiveWriter::open(&layout, &label).await.unwrap();
        assert!(!resumed.is_completed("src-1"));
        assert!(resumed.is_completed("src-2"));

        assert_eq!(resumed.begin_video("src-1").await.unwrap(), 2);
        assert_eq!(resumed.record().items.len(), 1);

        // Redo yields a single fresh set of items.
        resumed.append(sample_item("src-1", 0)).await.unwrap();
        resumed.append(sample_item("src-1", 1)).await.unwrap();
        resumed.mark_completed("src-1").await.unwrap();
        assert_eq!(resumed.record().items.len(), 3);
    }

    #[tokio::test]
    async fn test_begin_video_without_stale_items_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let (mut writer, layout, _) = open_writer(&dir).await;

        assert_eq!(writer.begin_video("src-1").await.unwrap(), 0);
        // Nothing was persisted yet.
        assert!(!layout.data_path().exists());
    }
}
