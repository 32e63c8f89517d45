//! Worker configuration.

use std::path::PathBuf;

use varc_models::SourceLabel;

use crate::error::{WorkerError, WorkerResult};

/// Port the classification service listens on.
pub const CLASSIFIER_PORT: u16 = 8080;

/// Manifest file name inside the source directory.
pub const MANIFEST_FILE: &str = "data.csv";

/// Video subdirectory name inside the source directory.
pub const VIDEO_DIR: &str = "video";

/// Everything the pipeline needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Source directory given on the command line
    pub source_dir: PathBuf,
    /// Manifest file inside the source directory
    pub manifest_path: PathBuf,
    /// Directory the manifest's filenames are relative to
    pub video_dir: PathBuf,
    /// Normalized label namespacing all output
    pub source_label: SourceLabel,
    /// Root under which per-source output trees are created
    pub output_root: PathBuf,
    /// Classification endpoint URL
    pub endpoint: String,
}

impl WorkerConfig {
    /// Resolve a config from the two CLI arguments, checking that the
    /// source directory is shaped as expected. Fails before any side
    /// effects. The output root defaults to `output` and can be moved
    /// with `VARC_OUTPUT_DIR`.
    pub fn resolve(source_dir: PathBuf, server: &str) -> WorkerResult<Self> {
        if !source_dir.is_dir() {
            return Err(WorkerError::config(format!(
                "source directory {} does not exist",
                source_dir.display()
            )));
        }

        let manifest_path = source_dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(WorkerError::config(format!(
                "{} not found in {}",
                MANIFEST_FILE,
                source_dir.display()
            )));
        }

        let video_dir = source_dir.join(VIDEO_DIR);
        if !video_dir.is_dir() {
            return Err(WorkerError::config(format!(
                "{} subdirectory not found in {}",
                VIDEO_DIR,
                source_dir.display()
            )));
        }

        let name = source_dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| WorkerError::config("source directory name is not valid UTF-8"))?;

        let output_root = std::env::var("VARC_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("output"));

        Ok(Self {
            manifest_path,
            video_dir,
            source_label: SourceLabel::from_dir_name(name),
            source_dir,
            output_root,
            endpoint: format!("http://{}:{}", server, CLASSIFIER_PORT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scaffold_source(dir: &TempDir, name: &str) -> PathBuf {
        let source = dir.path().join(name);
        std::fs::create_dir_all(source.join(VIDEO_DIR)).unwrap();
        std::fs::write(source.join(MANIFEST_FILE), "filename,sourceID,title,source,tags\n")
            .unwrap();
        source
    }

    #[test]
    fn test_resolve_valid_source() {
        let dir = TempDir::new().unwrap();
        let source = scaffold_source(&dir, "My Source");

        let config = WorkerConfig::resolve(source.clone(), "10.0.0.5").unwrap();
        assert_eq!(config.source_label.as_str(), "my_source");
        assert_eq!(config.endpoint, "http://10.0.0.5:8080");
        assert_eq!(config.manifest_path, source.join("data.csv"));
        assert_eq!(config.video_dir, source.join("video"));
    }

    #[test]
    fn test_missing_source_dir_is_config_error() {
        let err = WorkerConfig::resolve(PathBuf::from("/nonexistent/source"), "host").unwrap_err();
        assert!(matches!(err, WorkerError::Config(_)));
    }

    #[test]
    fn test_missing_manifest_is_config_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        std::fs::create_dir_all(source.join(VIDEO_DIR)).unwrap();

        let err = WorkerConfig::resolve(source, "host").unwrap_err();
        assert!(err.to_string().contains("data.csv"));
    }

    #[test]
    fn test_missing_video_dir_is_config_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join(MANIFEST_FILE), "").unwrap();

        let err = WorkerConfig::resolve(source, "host").unwrap_err();
        assert!(err.to_string().contains("video"));
    }
}
