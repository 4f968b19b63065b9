//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers::{convert, download, get_progress, health, list_effects, ready};
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/convert", post(convert))
        .route("/progress/:job_id", get(get_progress))
        .route("/download/:job_id", get(download))
        .route("/effects", get(list_effects))
        .layer(DefaultBodyLimit::max(state.config.max_body_size));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    let index = ServeFile::new(state.config.static_dir.join("index.html"));
    let favicon = ServeFile::new(state.config.static_dir.join("favicon.png"));
    let static_dir = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .route_service("/", index)
        .route_service("/favicon.png", favicon)
        .nest_service("/static", static_dir)
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
