//! Job status polling and artifact download handlers.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use tokio_util::io::ReaderStream;

use kenburns_models::JobId;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Job status response for polling clients.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    /// processing, done, or error
    pub status: String,
    /// Fraction in [0, 1]
    pub progress: f64,
    /// Diagnostic text, only present after a failed render
    pub error: Option<String>,
}

/// GET /api/progress/:job_id
///
/// Cheap non-blocking read of the job's current state; 404 if the id is
/// unknown or already reaped.
pub async fn get_progress(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<ProgressResponse>> {
    let id = JobId::from_string(job_id);
    let job = state
        .orchestrator
        .status(&id)
        .ok_or_else(|| ApiError::not_found("job not found"))?;

    Ok(Json(ProgressResponse {
        status: job.status.as_str().to_string(),
        progress: job.progress,
        error: job.error,
    }))
}

/// GET /api/download/:job_id
///
/// Streams the finished artifact as an attachment. 404 unknown id, 409 not
/// ready (including failed renders), 410 artifact missing. A successful
/// download reaps the job; the workspace is deleted while the held file
/// handle keeps the body streamable.
pub async fn download(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Response> {
    let id = JobId::from_string(job_id);
    let (file, job) = state.orchestrator.open_artifact(&id).await?;

    let content_length = file
        .metadata()
        .await
        .map(|m| m.len())
        .map_err(|_| ApiError::gone("artifact no longer available"))?;

    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::CONTENT_LENGTH, content_length)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", job.filename),
        )
        .body(body)
        .map_err(|e| ApiError::internal(format!("failed to build response: {e}")))
}
