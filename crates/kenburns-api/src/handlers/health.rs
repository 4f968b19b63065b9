//! Health check handlers.

use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub ffmpeg: CheckStatus,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Readiness check endpoint; verifies the rendering engine is reachable.
pub async fn ready() -> (StatusCode, Json<ReadinessResponse>) {
    match kenburns_media::check_ffmpeg() {
        Some(path) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready".to_string(),
                ffmpeg: CheckStatus {
                    status: "ok".to_string(),
                    path: Some(path.display().to_string()),
                },
            }),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: "not_ready".to_string(),
                ffmpeg: CheckStatus {
                    status: "missing".to_string(),
                    path: None,
                },
            }),
        ),
    }
}
