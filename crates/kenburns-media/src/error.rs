//! Error types for media operations.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while driving the external rendering engine.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The engine exited non-zero, could not be launched, or was missing
    /// from PATH. The message carries the tail of the captured diagnostics;
    /// callers never need to distinguish the causes.
    #[error("render failed: {message}")]
    RenderFailed {
        message: String,
        exit_code: Option<i32>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create a render failure error.
    pub fn render_failed(message: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::RenderFailed {
            message: message.into(),
            exit_code,
        }
    }
}
