//! Render submission handler.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Response for a submitted render job.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub job_id: String,
}

/// POST /api/convert
///
/// Multipart form: `file` (the image), `duration` (seconds, float),
/// `effect` (preset name, optional), `stage` (intensity tier, optional).
///
/// Out-of-range values are clamped rather than rejected; the only client
/// error is a missing or empty file part. Returns the job id immediately;
/// rendering continues in the background.
pub async fn convert(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ConvertResponse>> {
    let mut payload: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut duration = 5.0_f64;
    let mut effect: Option<String> = None;
    let mut stage = 1_i64;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                filename = field.file_name().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
                payload = Some(bytes.to_vec());
            }
            "duration" => {
                if let Ok(text) = field.text().await {
                    if let Ok(value) = text.trim().parse() {
                        duration = value;
                    }
                }
            }
            "effect" => {
                if let Ok(text) = field.text().await {
                    if !text.trim().is_empty() {
                        effect = Some(text.trim().to_string());
                    }
                }
            }
            "stage" => {
                if let Ok(text) = field.text().await {
                    if let Ok(value) = text.trim().parse() {
                        stage = value;
                    }
                }
            }
            other => {
                debug!(field = %other, "ignoring unknown form field");
            }
        }
    }

    let payload = payload.ok_or_else(|| ApiError::bad_request("missing file upload"))?;

    let job_id = state
        .orchestrator
        .submit(&payload, filename.as_deref(), duration, effect.as_deref(), stage)
        .await?;

    Ok(Json(ConvertResponse {
        job_id: job_id.to_string(),
    }))
}
