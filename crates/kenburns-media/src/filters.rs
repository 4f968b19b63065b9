//! FFmpeg filter-graph construction.
//!
//! The chain, in order: lanczos upscale to the oversampled working size
//! (aspect-preserving, cropped exact), the eased zoompan transform at the
//! internal frame rate, lanczos downscale to the output resolution, temporal
//! blend of neighboring frames, resample to the output rate, and a yuv420p
//! pixel format for broad player compatibility.

use crate::motion::{
    MotionParameters, INTERNAL_FPS, OUTPUT_FPS, OUTPUT_HEIGHT, OUTPUT_WIDTH, OVERSAMPLE_FACTOR,
};

/// Raised-cosine ease over the normalized frame index `on/denom`.
///
/// Evaluates to 0 at the first frame and 1 at the last, with zero velocity at
/// both ends. Used identically for zoom and pan so they reach their endpoints
/// in lockstep.
pub fn ease_expr(denom: u32) -> String {
    format!("(0.5-0.5*cos(PI*on/{denom}))")
}

/// Build the zoompan filter for a motion curve.
///
/// `x`/`y` position the crop window by pan anchor: `(iw-iw/zoom)` is the
/// available travel at the current zoom, scaled by the eased anchor.
pub fn zoompan_filter(params: &MotionParameters) -> String {
    let ease = ease_expr(params.ease_denominator());
    let target_width = OUTPUT_WIDTH * OVERSAMPLE_FACTOR;
    let target_height = OUTPUT_HEIGHT * OVERSAMPLE_FACTOR;

    let pan_x_delta = params.pan_end.x - params.pan_start.x;
    let pan_y_delta = params.pan_end.y - params.pan_start.y;

    format!(
        "zoompan=z='{start_zoom:.6}+({zoom_span:.6})*{ease}'\
         :x='(iw-iw/zoom)*({pan_x:.4}+({pan_x_delta:.4})*{ease})'\
         :y='(ih-ih/zoom)*({pan_y:.4}+({pan_y_delta:.4})*{ease})'\
         :d={frames}:s={target_width}x{target_height}:fps={INTERNAL_FPS}",
        start_zoom = params.start_zoom,
        zoom_span = params.zoom_span(),
        pan_x = params.pan_start.x,
        pan_y = params.pan_start.y,
        frames = params.internal_frames,
    )
}

/// Build the complete `-vf` chain for a motion render.
pub fn motion_filter_graph(params: &MotionParameters) -> String {
    let target_width = OUTPUT_WIDTH * OVERSAMPLE_FACTOR;
    let target_height = OUTPUT_HEIGHT * OVERSAMPLE_FACTOR;

    // Source is upscaled past the working size by the peak zoom so the crop
    // window never runs out of pixels.
    let base_width = (target_width as f64 * params.max_zoom()).round() as u32;
    let base_height = (target_height as f64 * params.max_zoom()).round() as u32;

    format!(
        "scale={base_width}:{base_height}:force_original_aspect_ratio=increase:flags=lanczos,\
         crop={base_width}:{base_height},\
         {zoompan},\
         scale={OUTPUT_WIDTH}:{OUTPUT_HEIGHT}:flags=lanczos,\
         tmix=frames=3:weights='1 1 1',\
         fps={OUTPUT_FPS},\
         format=yuv420p",
        zoompan = zoompan_filter(params),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kenburns_models::{EffectPreset, Point, ZoomDirection};

    fn params(direction: ZoomDirection, duration: f64) -> MotionParameters {
        let preset = EffectPreset {
            id: "test".to_string(),
            zoom_rate: 0.02,
            zoom_direction: direction,
            pan_start: Point::new(0.2, 0.5),
            pan_end: Point::new(0.8, 0.5),
        };
        MotionParameters::synthesize(&preset, 1, duration)
    }

    /// Mirror of the symbolic ease expression, for numeric checks.
    fn ease(on: u32, denom: u32) -> f64 {
        0.5 - 0.5 * (std::f64::consts::PI * on as f64 / denom as f64).cos()
    }

    #[test]
    fn ease_hits_both_endpoints() {
        let denom = 449;
        assert!(ease(0, denom).abs() < 1e-12);
        assert!((ease(denom, denom) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ease_is_monotonically_non_decreasing() {
        let denom = 299;
        let mut prev = ease(0, denom);
        for on in 1..=denom {
            let next = ease(on, denom);
            assert!(next >= prev, "ease decreased at frame {on}");
            prev = next;
        }
    }

    #[test]
    fn zoompan_embeds_frame_count_and_working_size() {
        let p = params(ZoomDirection::In, 5.0);
        let filter = zoompan_filter(&p);
        assert!(filter.contains(":d=450:"));
        assert!(filter.contains(":s=3840x2160:"));
        assert!(filter.contains("fps=90"));
        assert!(filter.contains("(0.5-0.5*cos(PI*on/449))"));
    }

    #[test]
    fn graph_oversamples_by_peak_zoom() {
        let p = params(ZoomDirection::Out, 10.0);
        // start_zoom = 1.2 for rate 0.02 over 10s
        let graph = motion_filter_graph(&p);
        assert!(graph.starts_with("scale=4608:2592:force_original_aspect_ratio=increase"));
        assert!(graph.contains("crop=4608:2592,"));
    }

    #[test]
    fn graph_ends_with_output_conditioning() {
        let p = params(ZoomDirection::In, 5.0);
        let graph = motion_filter_graph(&p);
        assert!(graph.contains("scale=1920:1080:flags=lanczos"));
        assert!(graph.contains("tmix=frames=3:weights='1 1 1'"));
        assert!(graph.ends_with("fps=60,format=yuv420p"));
    }

    #[test]
    fn single_frame_graph_is_well_formed() {
        let p = params(ZoomDirection::In, 0.001);
        let graph = motion_filter_graph(&p);
        assert!(graph.contains("PI*on/1"));
        assert!(graph.contains(":d=1:"));
    }
}
