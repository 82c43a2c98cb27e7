//! Health check handler.

use axum::{response::IntoResponse, Json};

use crate::types::HealthResponse;

/// Liveness check; does not touch the graph cache.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
