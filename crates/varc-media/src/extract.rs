//! Per-shot clip and preview-frame extraction.

use std::path::Path;
use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::segment::ShotSpan;

/// JPEG-scale quality used for preview frames (-q:v, lower is better).
const PREVIEW_QUALITY: u8 = 2;

/// Copy-extract a shot's sub-clip without re-encoding.
pub async fn extract_clip(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    span: &ShotSpan,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    debug!(
        input = %input.display(),
        output = %output.display(),
        start = span.start,
        duration = span.duration(),
        "Extracting clip"
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(span.start)
        .duration(span.duration())
        .codec_copy();

    FfmpegRunner::new().run(&cmd).await
}

/// Extract a single preview frame at the shot's temporal midpoint.
pub async fn extract_preview(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    span: &ShotSpan,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    debug!(
        input = %input.display(),
        output = %output.display(),
        at = span.midpoint(),
        "Extracting preview frame"
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(span.midpoint())
        .single_frame()
        .frame_quality(PREVIEW_QUALITY);

    FfmpegRunner::new().run(&cmd).await
}
