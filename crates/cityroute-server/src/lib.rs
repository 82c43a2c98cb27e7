//! # CityRoute Server
//!
//! REST API over [`cityroute_core::RouteService`].
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/city/distance` | [`submit_distances`] |
//! | `DELETE` | `/city/distance` | [`delete_distances`] |
//! | `GET` | `/city/path?start=&destination=` | [`find_paths`] |
//! | `GET` | `/city/cache` | [`cache_status`] |
//! | `POST` | `/city/cache/refresh` | [`refresh_cache`] |
//! | `GET` | `/health` | [`health_check`] |

#![allow(clippy::doc_markdown)]

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use cityroute_core::RouteService;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub mod handlers;
pub mod types;

pub use handlers::{
    cache_status, delete_distances, find_paths, health_check, refresh_cache, submit_distances,
};
pub use types::{ErrorResponse, HealthResponse, PathQuery};

/// Shared state of every handler.
#[derive(Debug)]
pub struct AppState {
    /// The route service answering all city requests.
    pub service: RouteService,
}

/// Builds the API router over `state`.
///
/// Layers such as CORS and request tracing are added by the binary.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/city/distance",
            post(submit_distances).delete(delete_distances),
        )
        .route("/city/path", get(find_paths))
        .route("/city/cache", get(cache_status))
        .route("/city/cache/refresh", post(refresh_cache))
        .with_state(state)
}

/// Builds the CORS layer for the configured `server.cors_origins`.
///
/// An empty list allows any origin. Entries that are not valid header values
/// are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        tracing::warn!("CORS: any origin allowed; set server.cors_origins to restrict it");
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "CORS: skipping unusable origin");
                None
            }
        })
        .collect();
    tracing::info!(origins = allowed.len(), "CORS: restricted origins");

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
