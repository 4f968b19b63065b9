//! The Ken Burns render operation.
//!
//! This module is the single point of contact with the engine's argument
//! syntax: it assembles the command for a motion render and streams the
//! engine's progress into the caller's callback.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::filters::motion_filter_graph;
use crate::motion::{MotionParameters, INTERNAL_FPS, OUTPUT_FPS};

/// Render an eased zoom/pan clip from a still image.
///
/// `on_progress` receives fractions in [0, 1] as the engine reports elapsed
/// output time. A failed render is terminal; it is never retried here.
pub async fn render_motion<F>(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    params: &MotionParameters,
    on_progress: F,
) -> MediaResult<()>
where
    F: Fn(f64) + Send + 'static,
{
    let input = input.as_ref();
    let output = output.as_ref();

    info!(
        input = %input.display(),
        output = %output.display(),
        duration_secs = params.duration_secs,
        internal_frames = params.internal_frames,
        output_frames = params.output_frames,
        "starting motion render"
    );

    let cmd = FfmpegCommand::new(input, output)
        .loop_still_image(INTERNAL_FPS)
        .video_filter(motion_filter_graph(params))
        .output_fps(OUTPUT_FPS)
        .frame_count(params.output_frames)
        .faststart();

    let runner = FfmpegRunner::new();
    runner
        .run_with_progress(&cmd, params.duration_secs, on_progress)
        .await?;

    info!(output = %output.display(), "motion render complete");
    Ok(())
}

/// Locate the ffmpeg binary, for readiness probes.
pub fn check_ffmpeg() -> Option<PathBuf> {
    which::which("ffmpeg").ok()
}
