//! Request and response bodies of the REST API.

use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Stable error kind, e.g. `unknown_city` or `no_path`.
    pub code: String,
}

/// Query string of `GET /city/path`.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    /// Start city.
    pub start: String,
    /// Destination city.
    pub destination: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: String,
    /// Server version.
    pub version: String,
}
