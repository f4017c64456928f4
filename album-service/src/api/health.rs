//! Health check endpoints

use album_common::api::{ErrorResponse, HealthResponse, NOT_FOUND_MESSAGE};
use axum::{http::StatusCode, routing::get, Json, Router};
use tracing::debug;

use crate::AppState;

/// Text served at `/`
pub const ROOT_TEXT: &str = "Albums API is running. Use /api/albums";

/// GET /
pub async fn root() -> &'static str {
    ROOT_TEXT
}

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        module: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for unrouted paths
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(NOT_FOUND_MESSAGE)))
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
}
