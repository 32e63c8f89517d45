//! Manifest loading and validation.

use std::path::Path;
use tracing::debug;

use varc_models::{ArchiveRecord, Video};

use crate::error::{WorkerError, WorkerResult};

/// Load the manifest, skipping rows whose source identity already
/// completed in an earlier run.
///
/// Columns, in order: filename, sourceID, title, sourceLabel, tags
/// (pipe-delimited). The header row is skipped. A row missing a column
/// is a validation error naming its line.
pub fn load_manifest(path: &Path, record: &ArchiveRecord) -> WorkerResult<Vec<Video>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut videos = Vec::new();

    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        let line = idx + 2; // line 1 is the header

        let filename = field(&row, 0, "filename", line)?;
        let source_id = field(&row, 1, "sourceID", line)?;
        let title = field(&row, 2, "title", line)?;
        let source = field(&row, 3, "sourceLabel", line)?;
        let tags = field(&row, 4, "tags", line)?;

        if record.is_completed(source_id) {
            debug!(source_id, filename, "Skipping already-completed video");
            continue;
        }

        videos.push(Video::from_manifest_row(
            filename, source_id, title, source, tags,
        ));
    }

    Ok(videos)
}

fn field<'r>(
    row: &'r csv::StringRecord,
    idx: usize,
    name: &str,
    line: usize,
) -> WorkerResult<&'r str> {
    row.get(idx).ok_or_else(|| {
        WorkerError::validation(format!(
            "manifest line {line} is missing the {name} column"
        ))
    })
}

/// Check that every referenced video file exists before processing starts.
///
/// Any missing file fails the whole run, listing every absent filename.
pub fn validate_sources(video_dir: &Path, videos: &[Video]) -> WorkerResult<()> {
    let missing: Vec<&str> = videos
        .iter()
        .filter(|v| !video_dir.join(&v.filename).is_file())
        .map(|v| v.filename.as_str())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(WorkerError::validation(format!(
            "video files missing under {}: {}",
            video_dir.display(),
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "filename,sourceID,title,source,tags\n";

    fn write_manifest(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("data.csv");
        std::fs::write(&path, format!("{HEADER}{body}")).unwrap();
        path
    }

    #[test]
    fn test_rows_become_videos() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "a.mp4,src-1,Title A,Source,tag1|tag2\nb.mp4,src-2,Title B,Source,tag3\n",
        );

        let videos = load_manifest(&path, &ArchiveRecord::new("label")).unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].filename, "a.mp4");
        assert_eq!(videos[0].tags, vec!["tag1", "tag2"]);
        assert_eq!(videos[1].source_id, "src-2");
        assert_ne!(videos[0].id, videos[1].id);
    }

    #[test]
    fn test_completed_rows_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "a.mp4,src-1,A,S,t\nb.mp4,src-2,B,S,t\n");

        let mut record = ArchiveRecord::new("label");
        record.mark_completed("src-1");

        let videos = load_manifest(&path, &record).unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].source_id, "src-2");
    }

    #[test]
    fn test_header_row_is_not_a_video() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "");
        assert!(load_manifest(&path, &ArchiveRecord::new("label"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_short_row_names_its_line() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "a.mp4,src-1,Title A,Source,t\nb.mp4,src-2\n");

        let err = load_manifest(&path, &ArchiveRecord::new("label")).unwrap_err();
        assert!(err.to_string().contains("line 3"), "got: {err}");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "a.mp4, src-1, Title A, Source A, tag1|tag2\n");

        let videos = load_manifest(&path, &ArchiveRecord::new("label")).unwrap();
        assert_eq!(videos[0].source, "Source A");
        assert_eq!(videos[0].title, "Title A");
    }

    #[test]
    fn test_validate_sources_reports_missing_files() {
        let dir = TempDir::new().unwrap();
        let video_dir = dir.path().join("video");
        std::fs::create_dir_all(&video_dir).unwrap();
        std::fs::write(video_dir.join("a.mp4"), b"x").unwrap();

        let videos = vec![
            Video::from_manifest_row("a.mp4", "src-1", "A", "S", ""),
            Video::from_manifest_row("b.mp4", "src-2", "B", "S", ""),
        ];

        let err = validate_sources(&video_dir, &videos).unwrap_err();
        assert!(err.to_string().contains("b.mp4"));
        assert!(!err.to_string().contains("a.mp4,"));

        std::fs::write(video_dir.join("b.mp4"), b"x").unwrap();
        assert!(validate_sources(&video_dir, &videos).is_ok());
    }
}
