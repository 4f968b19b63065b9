//! API error types.

use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Whether internal error details are hidden from response bodies.
///
/// Set once at startup from [`ApiConfig::is_production`]; defaults to
/// exposing details (development behavior) until then.
///
/// [`ApiConfig::is_production`]: crate::config::ApiConfig::is_production
static REDACT_INTERNAL: OnceLock<bool> = OnceLock::new();

pub(crate) fn set_internal_redaction(enabled: bool) {
    let _ = REDACT_INTERNAL.set(enabled);
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Gone: {0}")]
    Gone(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn gone(msg: impl Into<String>) -> Self {
        Self::Gone(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Gone(_) => StatusCode::GONE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body detail, with internal errors redacted when asked.
    fn detail(&self, redact_internal: bool) -> String {
        match self {
            ApiError::Internal(_) if redact_internal => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.detail(*REDACT_INTERNAL.get().unwrap_or(&false));
        let body = ErrorResponse { detail };
        (status, Json(body)).into_response()
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::gone("x").status_code(), StatusCode::GONE);
    }

    #[test]
    fn redaction_hides_internal_detail_only() {
        let internal = ApiError::internal("db path leaked");
        assert_eq!(internal.detail(true), "An internal error occurred");
        assert!(internal.detail(false).contains("db path leaked"));

        let not_found = ApiError::not_found("job 123");
        assert!(not_found.detail(true).contains("job 123"));
    }
}
