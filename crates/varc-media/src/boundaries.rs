//! Scene-boundary detection via FFprobe's lavfi scene filter.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Scene-change score above which a frame counts as a boundary (0-1 scale).
pub const SCENE_SCORE_THRESHOLD: f64 = 0.5;

/// Detect scene-cut boundaries in a video's visual stream.
///
/// Runs FFprobe over the lavfi `movie` source with a `select=gt(scene,N)`
/// filter and collects the presentation timestamp of every selected frame.
/// Returns the boundary timestamps in stream order.
pub async fn detect_boundaries(input: impl AsRef<Path>) -> MediaResult<Vec<f64>> {
    let input = input.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let graph = format!(
        "movie={},select=gt(scene\\,{})",
        input.display(),
        SCENE_SCORE_THRESHOLD
    );

    debug!(input = %input.display(), "Detecting scene boundaries");

    let output = Command::new("ffprobe")
        .args([
            "-loglevel",
            "error",
            "-skip_frame",
            "nokey",
            "-select_streams",
            "v:0",
            "-show_frames",
            "-of",
            "compact=p=0",
            "-f",
            "lavfi",
        ])
        .arg(&graph)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            "Scene detection failed",
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let boundaries = parse_boundaries(&stdout);

    debug!(
        input = %input.display(),
        boundaries = boundaries.len(),
        "Scene detection complete"
    );

    Ok(boundaries)
}

/// Parse boundary timestamps out of FFprobe's `compact=p=0` frame output.
///
/// Each line is a `|`-separated list of `key=value` fields; the
/// `pkt_pts_time` field carries the frame's presentation timestamp.
fn parse_boundaries(output: &str) -> Vec<f64> {
    let mut timestamps = Vec::new();

    for line in output.lines() {
        for field in line.split('|') {
            let Some((key, value)) = field.split_once('=') else {
                continue;
            };
            if key == "pkt_pts_time" {
                if let Ok(ts) = value.trim().parse::<f64>() {
                    timestamps.push(ts);
                }
            }
        }
    }

    timestamps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_frame_lines() {
        let output = "\
media_type=video|stream_index=0|key_frame=1|pkt_pts=135000|pkt_pts_time=1.500000|pkt_dts=135000
media_type=video|stream_index=0|key_frame=1|pkt_pts=360000|pkt_pts_time=4.000000|pkt_dts=360000
media_type=video|stream_index=0|key_frame=1|pkt_pts=810000|pkt_pts_time=9.000000|pkt_dts=810000
";
        assert_eq!(parse_boundaries(output), vec![1.5, 4.0, 9.0]);
    }

    #[test]
    fn test_parse_ignores_unrelated_fields_and_noise() {
        let output = "media_type=video|pkt_dts_time=2.000000|pkt_pts_time=3.250000\nnot-a-field\n";
        assert_eq!(parse_boundaries(output), vec![3.25]);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_boundaries("").is_empty());
    }

    #[test]
    fn test_parse_malformed_timestamp_skipped() {
        let output = "pkt_pts_time=abc|pkt_pts_time=7.5";
        assert_eq!(parse_boundaries(output), vec![7.5]);
    }
}
