//! SSE event stream endpoint

use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /api/events
///
/// Streams board events (`card-updated`, `clear-completed`,
/// `card-restored`) to connected clients.
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    state.events.handle_sse_connection()
}
