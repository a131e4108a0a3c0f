//! Card lifecycle orchestration
//!
//! Single write path for direct API edits, the completed-bucket sweep, and
//! archive restore. Every successful mutation is announced on the event
//! channel; announcements are lossy and never block or fail the write.

use crate::db::CardStore;
use crate::sse::EventBroadcaster;
use bundle_common::{BoardEvent, Bucket, Card, Error, Result};
use tracing::info;

#[derive(Clone)]
pub struct CardLifecycle {
    store: CardStore,
    events: EventBroadcaster,
}

impl CardLifecycle {
    pub fn new(store: CardStore, events: EventBroadcaster) -> Self {
        Self { store, events }
    }

    /// Validate, normalize, and store a card, then announce the change.
    /// Returns the card as stored.
    pub async fn upsert_card(&self, card: Card) -> Result<Card> {
        if card.missing_trip_id() {
            return Err(Error::InvalidInput("card is missing a trip id".to_string()));
        }

        let card = card.normalized();
        self.store.upsert(&card).await?;
        self.events.broadcast_lossy(BoardEvent::card_updated(card.clone()));
        Ok(card)
    }

    /// Move every card in the terminal "Bundle Completed" bucket to the
    /// archive. Returns the number of cards moved.
    pub async fn sweep_completed(&self) -> Result<u64> {
        let archived = self.store.archive_by_bucket(Bucket::BundleCompleted).await?;
        info!("Completed-bucket sweep archived {} cards", archived);
        self.events.broadcast_lossy(BoardEvent::clear_completed(archived));
        Ok(archived)
    }

    /// Bring a card back from the archive.
    ///
    /// `None` means the trip id was not archived; nothing changes and
    /// nothing is announced in that case.
    pub async fn restore_from_archive(&self, trip_id: &str) -> Result<Option<Card>> {
        match self.store.restore(trip_id).await? {
            Some(card) => {
                self.events.broadcast_lossy(BoardEvent::card_restored(card.clone()));
                Ok(Some(card))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    async fn lifecycle() -> CardLifecycle {
        let store = CardStore::new(memory_pool().await);
        CardLifecycle::new(store, EventBroadcaster::new(16))
    }

    fn card(trip_id: &str, bucket: Bucket) -> Card {
        Card {
            trip_id: trip_id.to_string(),
            current_bucket: bucket,
            ..Card::default()
        }
    }

    #[tokio::test]
    async fn upsert_normalizes_and_announces() {
        let lc = lifecycle().await;
        let mut rx = lc.events.subscribe();

        let written = Card {
            trip_id: "T1".to_string(),
            traveler: " Ana ".to_string(),
            items_accepted: 2,
            items_ready_to_process: 9,
            ..Card::default()
        };
        let stored = lc.upsert_card(written).await.unwrap();
        assert_eq!(stored.traveler, "Ana");
        assert_eq!(stored.items_ready_to_process, 2);

        match rx.recv().await.unwrap() {
            BoardEvent::CardUpdated { card, .. } => assert_eq!(card, stored),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn upsert_without_trip_id_fails_and_stays_silent() {
        let lc = lifecycle().await;
        let mut rx = lc.events.subscribe();

        let err = lc.upsert_card(Card::default()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn sweep_archives_completed_cards_and_announces() {
        let lc = lifecycle().await;
        lc.upsert_card(card("A", Bucket::BundleCompleted)).await.unwrap();
        lc.upsert_card(card("B", Bucket::PendingInProgress)).await.unwrap();

        let mut rx = lc.events.subscribe();
        let archived = lc.sweep_completed().await.unwrap();
        assert_eq!(archived, 1);

        let active: Vec<String> = lc.store.get_all().await.unwrap().into_iter().map(|c| c.trip_id).collect();
        assert_eq!(active, vec!["B".to_string()]);
        assert_eq!(lc.store.list_archive().await.unwrap()[0].trip_id, "A");

        match rx.recv().await.unwrap() {
            BoardEvent::ClearCompleted { archived, .. } => assert_eq!(archived, 1),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn restore_announces_hit_but_not_miss() {
        let lc = lifecycle().await;
        lc.upsert_card(card("T1", Bucket::BundleCompleted)).await.unwrap();
        lc.sweep_completed().await.unwrap();

        let mut rx = lc.events.subscribe();
        let restored = lc.restore_from_archive("T1").await.unwrap().unwrap();
        assert_eq!(restored.trip_id, "T1");
        match rx.recv().await.unwrap() {
            BoardEvent::CardRestored { card, .. } => assert_eq!(card.trip_id, "T1"),
            other => panic!("unexpected event: {:?}", other),
        }

        // Second restore misses: no state change, no event
        assert!(lc.restore_from_archive("T1").await.unwrap().is_none());
        assert!(rx.try_recv().is_err());
        assert_eq!(lc.store.get_all().await.unwrap().len(), 1);
    }
}
