//! Shared data models for the Ken Burns render service.
//!
//! This crate provides Serde-serializable types for:
//! - Render jobs and their lifecycle states
//! - Visual effect presets (zoom/pan definitions)

pub mod effect;
pub mod job;

// Re-export common types
pub use effect::{
    EffectPreset, Point, RawEffectPreset, ZoomDirection, DEFAULT_EFFECT_ID, DEFAULT_PAN,
    DEFAULT_ZOOM_RATE, MAX_ZOOM_RATE,
};
pub use job::{Job, JobId, JobStatus};
