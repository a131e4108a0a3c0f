//! HTTP API handlers for bundle-board

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

pub mod archive;
pub mod cards;
pub mod health;
pub mod import;
pub mod sse;

pub use archive::{clear_completed, get_archive, restore_archive};
pub use cards::{get_cards, post_card};
pub use health::health;
pub use import::upload_csv;
pub use sse::event_stream;

/// Error payload for 4xx/5xx responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message.into() }),
    )
}

/// Map a service error onto its HTTP status: invalid input is the caller's
/// fault, everything else is a storage-side failure.
pub(crate) fn map_error(err: bundle_common::Error) -> ApiError {
    match err {
        bundle_common::Error::InvalidInput(message) => bad_request(message),
        other => {
            tracing::error!("Request failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: other.to_string() }),
            )
        }
    }
}
