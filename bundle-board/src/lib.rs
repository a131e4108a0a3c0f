//! bundle-board library - trip card board service
//!
//! Stores trip/shipment cards, buckets them through the bundling workflow,
//! bulk-imports CSV rows, and archives/restores completed bundles. Exposes
//! a JSON API plus an SSE side-channel for board updates.

use axum::Router;
use sqlx::SqlitePool;

pub mod api;
pub mod db;
pub mod import;
pub mod lifecycle;
pub mod sse;

use db::CardStore;
use lifecycle::CardLifecycle;
use sse::EventBroadcaster;

/// Events buffered per SSE subscriber before slow clients start lagging.
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Card store over the active and archive tables
    pub store: CardStore,
    /// Write orchestration and notification fan-out
    pub lifecycle: CardLifecycle,
    /// Broadcast channel behind GET /api/events
    pub events: EventBroadcaster,
}

impl AppState {
    /// Create application state around a connected database pool
    pub fn new(pool: SqlitePool) -> Self {
        let store = CardStore::new(pool);
        let events = EventBroadcaster::new(EVENT_CHANNEL_CAPACITY);
        let lifecycle = CardLifecycle::new(store.clone(), events.clone());
        Self { store, lifecycle, events }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};
    use tower_http::cors::CorsLayer;

    Router::new()
        .route("/health", get(api::health))
        .route("/api/cards", get(api::get_cards))
        .route("/api/card", post(api::post_card))
        .route("/api/uploadCsv", post(api::upload_csv))
        .route("/api/clearCompleted", post(api::clear_completed))
        .route("/api/archive", get(api::get_archive))
        .route("/api/restoreArchive", post(api::restore_archive))
        .route("/api/events", get(api::event_stream))
        .with_state(state)
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
