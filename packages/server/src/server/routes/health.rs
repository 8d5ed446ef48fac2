use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    upstream_base_url: String,
    cache_ttl_minutes: i64,
}

/// Health check endpoint.
///
/// The service holds no database or broker connections; if the process
/// answers, it is healthy. The payload echoes the effective upstream
/// configuration for quick diagnostics.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        upstream_base_url: state.config.upstream_base_url.clone(),
        cache_ttl_minutes: state.config.cache_ttl_minutes,
    })
}
