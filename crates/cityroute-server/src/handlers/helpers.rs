//! Shared handler helpers: mapping core errors to HTTP responses.

use axum::{http::StatusCode, Json};
use cityroute_core::Error;

use crate::types::ErrorResponse;

/// Maps a core error to its status code and JSON body.
///
/// Unknown cities, missing paths and invalid input are the caller's problem
/// (400); an exhausted search budget is 422. Storage and rebuild failures go
/// through [`internal_error`] so their details stay in the server log.
pub fn error_response(context: &str, err: &Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        Error::SearchBudgetExceeded { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        e => return internal_error(context, e.code(), e),
    };
    tracing::debug!(%context, code = err.code(), error = %err, "Request rejected");
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
        }),
    )
}

/// Build an internal server error response without leaking implementation details.
///
/// Logs the full error via `tracing::error!` and returns a generic message.
pub fn internal_error(
    context: &str,
    code: &str,
    err: &dyn std::fmt::Display,
) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!(%context, error = %err, "Internal server error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("{context}: internal error"),
            code: code.to_string(),
        }),
    )
}
