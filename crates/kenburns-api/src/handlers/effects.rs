//! Effect catalog listing handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use kenburns_models::EffectPreset;

use crate::state::AppState;

/// Catalog listing response.
#[derive(Debug, Serialize)]
pub struct EffectsResponse {
    pub effects: Vec<EffectPreset>,
    pub default: String,
}

/// GET /api/effects
///
/// Lists the loaded presets so the picker UI can populate itself.
pub async fn list_effects(State(state): State<AppState>) -> Json<EffectsResponse> {
    Json(EffectsResponse {
        effects: state.catalog.presets().into_iter().cloned().collect(),
        default: kenburns_models::DEFAULT_EFFECT_ID.to_string(),
    })
}
