//! Visual effect presets.
//!
//! A preset describes the camera motion applied over a still image: how fast
//! the zoom advances, which way it goes, and where the pan starts and ends.
//! Presets are normalized once at catalog load time so every consumer can
//! assume valid, clamped values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Effect used whenever a requested name is unknown or the catalog is empty.
pub const DEFAULT_EFFECT_ID: &str = "zoom_in_center";

/// Default zoom rate (fraction of zoom gained per second).
pub const DEFAULT_ZOOM_RATE: f64 = 0.015;

/// Upper bound on the per-second zoom rate; prevents runaway zoom from
/// malformed preset files.
pub const MAX_ZOOM_RATE: f64 = 0.05;

/// Frame-centered pan anchor.
pub const DEFAULT_PAN: Point = Point { x: 0.5, y: 0.5 };

/// Fractional position within the frame, each coordinate in [0, 1].
///
/// Serializes as a `[x, y]` pair, matching the on-disk preset format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates into [0, 1].
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

/// Direction of the zoom over the clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    /// Start at 1.0, animate toward the zoom target
    #[default]
    In,
    /// Start at the zoom target, settle back to 1.0
    Out,
}

impl ZoomDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomDirection::In => "in",
            ZoomDirection::Out => "out",
        }
    }
}

/// A fully validated effect preset.
///
/// Every numeric field is clamped into its valid range at load time, never at
/// consumption time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectPreset {
    /// Unique preset name
    pub id: String,
    /// Zoom gained per second, in [0, MAX_ZOOM_RATE]
    pub zoom_rate: f64,
    /// Zoom direction
    pub zoom_direction: ZoomDirection,
    /// Pan anchor at clip start
    pub pan_start: Point,
    /// Pan anchor at clip end
    pub pan_end: Point,
}

impl EffectPreset {
    /// The built-in preset, guaranteed to exist even with an empty or
    /// malformed catalog source.
    pub fn builtin_default() -> Self {
        Self {
            id: DEFAULT_EFFECT_ID.to_string(),
            zoom_rate: DEFAULT_ZOOM_RATE,
            zoom_direction: ZoomDirection::In,
            pan_start: DEFAULT_PAN,
            pan_end: DEFAULT_PAN,
        }
    }
}

impl Default for EffectPreset {
    fn default() -> Self {
        Self::builtin_default()
    }
}

/// Raw on-disk shape of a preset record.
///
/// Fields are kept as loose JSON values so a single wrongly-typed field falls
/// back to its default instead of rejecting the whole record.
#[derive(Debug, Default, Deserialize)]
pub struct RawEffectPreset {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub zoom_rate: Value,
    #[serde(default)]
    pub zoom_direction: Value,
    #[serde(default)]
    pub pan_start: Value,
    #[serde(default)]
    pub pan_end: Value,
}

impl RawEffectPreset {
    /// Normalize into a validated preset, clamping every numeric field.
    ///
    /// `fallback_id` names the preset when the record carries no usable `id`
    /// (callers pass the file stem).
    pub fn normalize(self, fallback_id: &str) -> EffectPreset {
        let id = self
            .id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| fallback_id.to_string());

        let zoom_rate = self
            .zoom_rate
            .as_f64()
            .unwrap_or(DEFAULT_ZOOM_RATE)
            .clamp(0.0, MAX_ZOOM_RATE);

        let zoom_direction = match self.zoom_direction.as_str() {
            Some("out") => ZoomDirection::Out,
            _ => ZoomDirection::In,
        };

        EffectPreset {
            id,
            zoom_rate,
            zoom_direction,
            pan_start: parse_point(&self.pan_start).unwrap_or(DEFAULT_PAN),
            pan_end: parse_point(&self.pan_end).unwrap_or(DEFAULT_PAN),
        }
    }
}

/// Parse a `[x, y]` pair from a loose JSON value, clamping into [0, 1]².
fn parse_point(value: &Value) -> Option<Point> {
    let pair = value.as_array()?;
    if pair.len() != 2 {
        return None;
    }
    let x = pair[0].as_f64()?;
    let y = pair[1].as_f64()?;
    Some(Point::new(x, y).clamped())
}
