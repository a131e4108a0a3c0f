//! Event broadcaster for real-time client updates

use axum::response::sse::{Event, KeepAlive, Sse};
use bundle_common::BoardEvent;
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Manages subscriber connections and event distribution
#[derive(Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<BoardEvent>,
}

impl EventBroadcaster {
    /// Create a broadcaster buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Broadcast an event, ignoring whether anyone is listening
    pub fn broadcast_lossy(&self, event: BoardEvent) {
        let _ = self.tx.send(event);
    }

    /// Current number of connected subscribers
    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Subscribe to the raw event channel
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.tx.subscribe()
    }

    /// Stream of SSE frames for a new client connection
    pub fn subscribe_stream(&self) -> impl Stream<Item = Result<Event, Infallible>> {
        let rx = self.tx.subscribe();

        BroadcastStream::new(rx).filter_map(|result| async move {
            match result {
                Ok(event) => {
                    let name = event.event_name();
                    debug!("Broadcasting SSE event: {}", name);
                    Event::default()
                        .id(Uuid::new_v4().to_string())
                        .event(name)
                        .json_data(&event)
                        .ok()
                        .map(Ok)
                }
                Err(e) => {
                    // Lagged or closed receiver: drop the frame and continue
                    warn!("SSE stream error: {:?}", e);
                    None
                }
            }
        })
    }

    /// Create an Axum SSE response for a new client connection
    pub fn handle_sse_connection(&self) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
        info!("New SSE client connected, total clients: {}", self.client_count());

        Sse::new(self.subscribe_stream()).keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(15))
                .text("keep-alive"),
        )
    }
}
