//! Event types for the BundleBoard notification channel
//!
//! Emitted by the lifecycle service after a successful mutation and fanned
//! out to SSE subscribers. Fan-out is lossy: no subscriber, no problem.

use crate::card::Card;
use serde::{Deserialize, Serialize};

/// Board change events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BoardEvent {
    /// A card was created or fully replaced
    CardUpdated {
        card: Card,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The completed-bucket sweep ran (count only, no per-card detail)
    ClearCompleted {
        archived: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A card was moved back out of the archive
    CardRestored {
        card: Card,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl BoardEvent {
    pub fn card_updated(card: Card) -> Self {
        Self::CardUpdated { card, timestamp: chrono::Utc::now() }
    }

    pub fn clear_completed(archived: u64) -> Self {
        Self::ClearCompleted { archived, timestamp: chrono::Utc::now() }
    }

    pub fn card_restored(card: Card) -> Self {
        Self::CardRestored { card, timestamp: chrono::Utc::now() }
    }

    /// SSE event field for this variant
    pub fn event_name(&self) -> &'static str {
        match self {
            BoardEvent::CardUpdated { .. } => "card-updated",
            BoardEvent::ClearCompleted { .. } => "clear-completed",
            BoardEvent::CardRestored { .. } => "card-restored",
        }
    }
}
