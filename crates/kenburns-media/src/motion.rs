//! Motion-curve synthesis.
//!
//! Turns an effect preset, a stage multiplier, and a target duration into the
//! fully-determined zoom/pan trajectory and the derived rendering-pipeline
//! parameters. Synthesis is a total function over validated inputs: callers
//! clamp the duration first and the catalog clamps presets at load time.

use kenburns_models::{EffectPreset, Point, ZoomDirection};

/// Frame rate of the delivered artifact.
pub const OUTPUT_FPS: u32 = 60;

/// Frame rate the zoompan transform runs at before temporal resampling.
/// Higher than the output rate so `tmix` has neighbor frames to blend.
pub const INTERNAL_FPS: u32 = 90;

/// Hard cap on requested clip duration.
pub const MAX_DURATION_SECS: f64 = 60.0;

/// Duration used when the request carries a non-positive value.
pub const FALLBACK_DURATION_SECS: f64 = 5.0;

/// Maximum zoom factor the curve may reach.
pub const MAX_ZOOM: f64 = 1.6;

/// Final output resolution.
pub const OUTPUT_WIDTH: u32 = 1920;
pub const OUTPUT_HEIGHT: u32 = 1080;

/// Working resolution multiplier. Zoompan on a still image at native
/// resolution stair-steps visibly; rendering 2x and downscaling with lanczos
/// removes it.
pub const OVERSAMPLE_FACTOR: u32 = 2;

/// Clamp a requested duration into `(0, MAX_DURATION_SECS]`, defaulting
/// non-positive input to the fallback duration.
pub fn clamp_duration(seconds: f64) -> f64 {
    if seconds <= 0.0 || !seconds.is_finite() {
        return FALLBACK_DURATION_SECS;
    }
    seconds.min(MAX_DURATION_SECS)
}

/// Clamp a requested stage into the supported set {1, 2, 3}.
pub fn clamp_stage(stage: i64) -> u8 {
    match stage {
        1..=3 => stage as u8,
        _ => 1,
    }
}

/// Zoom-rate multiplier for a stage tier. Higher stage, more dramatic motion.
pub fn stage_multiplier(stage: u8) -> f64 {
    match stage {
        2 => 1.35,
        3 => 1.7,
        _ => 1.0,
    }
}

/// Fully-determined motion trajectory for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionParameters {
    /// Frames the zoompan transform produces at `INTERNAL_FPS`
    pub internal_frames: u32,
    /// Frames delivered at `OUTPUT_FPS`
    pub output_frames: u32,
    /// Zoom factor at the first frame
    pub start_zoom: f64,
    /// Zoom factor at the last frame
    pub end_zoom: f64,
    /// Pan anchor at clip start
    pub pan_start: Point,
    /// Pan anchor at clip end
    pub pan_end: Point,
    /// Clip duration in seconds (pre-clamped)
    pub duration_secs: f64,
}

impl MotionParameters {
    /// Synthesize the motion curve for `preset` at `stage` over
    /// `duration_secs`.
    ///
    /// The clip always starts at a valid in-bounds crop and animates
    /// monotonically toward the target zoom: zoom-out starts at the target
    /// and settles to 1.0, zoom-in does the reverse.
    pub fn synthesize(preset: &EffectPreset, stage: u8, duration_secs: f64) -> Self {
        let rate = preset.zoom_rate * stage_multiplier(stage);
        let zoom_delta = (rate * duration_secs).clamp(0.0, MAX_ZOOM - 1.0);

        let (start_zoom, end_zoom) = match preset.zoom_direction {
            ZoomDirection::Out => (1.0 + zoom_delta, 1.0),
            ZoomDirection::In => (1.0, 1.0 + zoom_delta),
        };

        // Sub-frame durations still produce a valid single-frame render.
        let internal_frames = ((duration_secs * INTERNAL_FPS as f64).round() as u32).max(1);
        let output_frames = ((duration_secs * OUTPUT_FPS as f64).round() as u32).max(1);

        Self {
            internal_frames,
            output_frames,
            start_zoom,
            end_zoom,
            pan_start: preset.pan_start,
            pan_end: preset.pan_end,
            duration_secs,
        }
    }

    /// Peak zoom factor over the clip.
    pub fn max_zoom(&self) -> f64 {
        self.start_zoom.max(self.end_zoom)
    }

    /// Signed zoom travel from start to end.
    pub fn zoom_span(&self) -> f64 {
        self.end_zoom - self.start_zoom
    }

    /// Denominator for the normalized frame index, floored to 1 so a
    /// single-frame clip never divides by zero.
    pub fn ease_denominator(&self) -> u32 {
        self.internal_frames.saturating_sub(1).max(1)
    }
}
