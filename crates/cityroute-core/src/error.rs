//! Error types for CityRoute.

use thiserror::Error;

use crate::graph::LimitType;

/// CityRoute error types.
///
/// `UnknownCity` and `NoPath` are expected outcomes of a path query and are
/// reported to callers as distinct variants. `Rebuild` is an internal
/// degradation: the cache keeps serving its previous snapshot.
#[derive(Error, Debug)]
pub enum Error {
    /// A query named a city absent from the current snapshot.
    #[error("{0} is unknown in the system")]
    UnknownCity(String),

    /// Both cities exist but no simple path connects them.
    #[error("Unfortunately, there is no path between {start} and {destination}")]
    NoPath {
        /// Query start city.
        start: String,
        /// Query destination city.
        destination: String,
    },

    /// A path search ran past its configured budget.
    #[error("Path search from {start} to {destination} exceeded its {} budget", limit.as_str())]
    SearchBudgetExceeded {
        /// Which budget was exhausted.
        limit: LimitType,
        /// Query start city.
        start: String,
        /// Query destination city.
        destination: String,
    },

    /// City name is empty or whitespace-only.
    #[error("Invalid city name: {0:?} (must not be blank)")]
    InvalidCityName(String),

    /// Distance between two cities is outside `1..=MAX_DISTANCE`.
    #[error(
        "Invalid distance {distance} between {city_a} and {city_b} (must be between 1 and {})",
        crate::graph::MAX_DISTANCE
    )]
    InvalidDistance {
        /// First city of the rejected entry.
        city_a: String,
        /// Second city of the rejected entry.
        city_b: String,
        /// Rejected distance value.
        distance: i64,
    },

    /// The graph cache could not be rebuilt from the edge source.
    #[error("Graph rebuild failed: {0}")]
    Rebuild(String),

    /// The edge source failed to read or write records.
    #[error("Edge source error: {0}")]
    EdgeSource(String),

    /// IO error from a file-backed edge source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable snake_case kind, used by the HTTP layer and in logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCity(_) => "unknown_city",
            Self::NoPath { .. } => "no_path",
            Self::SearchBudgetExceeded { .. } => "search_budget_exceeded",
            Self::InvalidCityName(_) | Self::InvalidDistance { .. } => "invalid_input",
            Self::Rebuild(_) => "rebuild_failed",
            Self::EdgeSource(_) | Self::Io(_) | Self::Json(_) => "storage_error",
        }
    }

    /// Returns true for errors caused by the caller's input or query,
    /// as opposed to internal storage failures.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCity(_)
                | Self::NoPath { .. }
                | Self::SearchBudgetExceeded { .. }
                | Self::InvalidCityName(_)
                | Self::InvalidDistance { .. }
        )
    }
}

/// Result type alias for CityRoute operations.
pub type Result<T> = std::result::Result<T, Error>;
