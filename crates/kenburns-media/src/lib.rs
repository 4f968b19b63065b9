//! FFmpeg CLI wrapper for Ken Burns rendering.
//!
//! This crate provides:
//! - Deterministic motion-curve synthesis from an effect preset
//! - Filter-graph construction (upscale, zoompan, downscale, blend)
//! - Type-safe FFmpeg command building
//! - Progress parsing from `-progress pipe:2` with a bounded log ring

pub mod command;
pub mod error;
pub mod filters;
pub mod motion;
pub mod progress;
pub mod render;

pub use command::{FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use filters::{ease_expr, motion_filter_graph, zoompan_filter};
pub use motion::{
    clamp_duration, clamp_stage, stage_multiplier, MotionParameters, FALLBACK_DURATION_SECS,
    INTERNAL_FPS, MAX_DURATION_SECS, MAX_ZOOM, OUTPUT_FPS, OUTPUT_HEIGHT, OUTPUT_WIDTH,
    OVERSAMPLE_FACTOR,
};
pub use progress::{parse_out_time_us, progress_fraction, LogRing};
pub use render::{check_ffmpeg, render_motion};
