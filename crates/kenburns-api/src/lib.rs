//! Axum HTTP API server.
//!
//! This crate provides:
//! - Multipart image upload and asynchronous render submission
//! - Job status polling and artifact download
//! - The concurrency-safe job registry and render orchestrator

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod orchestrator;
pub mod registry;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use orchestrator::JobOrchestrator;
pub use registry::JobRegistry;
pub use routes::create_router;
pub use state::AppState;
