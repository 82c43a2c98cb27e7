//! City distance and path handlers.
//!
//! Every handler runs the route service on the blocking pool: path
//! enumeration is CPU-bound and the file-backed edge source does sync IO.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cityroute_core::graph::DistanceInput;

use super::helpers::{error_response, internal_error};
use crate::types::PathQuery;
use crate::AppState;

/// Stores a batch of distances and rebuilds the graph cache.
pub async fn submit_distances(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<Vec<DistanceInput>>,
) -> impl IntoResponse {
    let result =
        tokio::task::spawn_blocking(move || state.service.submit_distances(&inputs)).await;

    match result {
        Ok(Ok(outcome)) => Json(outcome).into_response(),
        Ok(Err(e)) => error_response("Submit distances", &e).into_response(),
        Err(e) => internal_error("Submit distances", "task_failed", &e).into_response(),
    }
}

/// Returns every simple path between two cities, shortest first.
pub async fn find_paths(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> impl IntoResponse {
    let result = tokio::task::spawn_blocking(move || {
        state
            .service
            .query_paths(&query.start, &query.destination)
    })
    .await;

    match result {
        Ok(Ok(paths)) => Json(paths).into_response(),
        Ok(Err(e)) => error_response("Find paths", &e).into_response(),
        Err(e) => internal_error("Find paths", "task_failed", &e).into_response(),
    }
}

/// Deletes every stored distance.
pub async fn delete_distances(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let result = tokio::task::spawn_blocking(move || state.service.clear_all()).await;

    match result {
        Ok(Ok(())) => StatusCode::NO_CONTENT.into_response(),
        Ok(Err(e)) => error_response("Delete distances", &e).into_response(),
        Err(e) => internal_error("Delete distances", "task_failed", &e).into_response(),
    }
}

/// Reports the graph cache generation, size and rebuild health.
pub async fn cache_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.service.cache_status())
}

/// Rebuilds the graph cache from the edge source.
pub async fn refresh_cache(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let result = tokio::task::spawn_blocking(move || state.service.refresh()).await;

    match result {
        Ok(Ok(status)) => Json(status).into_response(),
        Ok(Err(e)) => error_response("Refresh cache", &e).into_response(),
        Err(e) => internal_error("Refresh cache", "task_failed", &e).into_response(),
    }
}
