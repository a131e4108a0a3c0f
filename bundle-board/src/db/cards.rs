//! Card store over the active and archive tables
//!
//! Cards persist as JSON documents keyed by trip id, one row per card. A
//! trip id lives in at most one of the two tables at any time: the two-step
//! moves between them (archive sweep, restore) run per card inside a
//! transaction, and the whole move operation serializes behind a store-wide
//! lock so two moves of the same trip id cannot interleave. Plain upserts
//! are single atomic statements and take no lock.

use bundle_common::{Bucket, Card, Error, Result};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Persistent card storage, cheap to clone into handlers.
#[derive(Clone)]
pub struct CardStore {
    pool: SqlitePool,
    move_lock: Arc<Mutex<()>>,
}

impl CardStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            move_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Every active card on the board.
    pub async fn get_all(&self) -> Result<Vec<Card>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT data FROM cards")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|(data,)| Ok(serde_json::from_str(data)?))
            .collect()
    }

    /// Insert or fully replace a card by trip id.
    pub async fn upsert(&self, card: &Card) -> Result<()> {
        if card.missing_trip_id() {
            return Err(Error::InvalidInput("card is missing a trip id".to_string()));
        }

        let data = serde_json::to_string(card)?;
        sqlx::query("INSERT OR REPLACE INTO cards (trip_id, data) VALUES (?, ?)")
            .bind(&card.trip_id)
            .bind(&data)
            .execute(&self.pool)
            .await?;

        debug!("Card saved: {}", card.trip_id);
        Ok(())
    }

    /// Move every active card sitting in `bucket` to the archive.
    ///
    /// Each card moves in its own transaction, so an interruption mid-sweep
    /// leaves every card wholly in one table; the sweep as a whole is not a
    /// single transaction. Returns the number of cards moved.
    pub async fn archive_by_bucket(&self, bucket: Bucket) -> Result<u64> {
        let _guard = self.move_lock.lock().await;

        let rows: Vec<(String, String)> = sqlx::query_as("SELECT trip_id, data FROM cards")
            .fetch_all(&self.pool)
            .await?;

        let mut moved = 0;
        for (trip_id, data) in rows {
            let card: Card = serde_json::from_str(&data)?;
            if card.current_bucket != bucket {
                continue;
            }

            let mut tx = self.pool.begin().await?;
            sqlx::query("INSERT OR REPLACE INTO archive (trip_id, data) VALUES (?, ?)")
                .bind(&trip_id)
                .bind(&data)
                .execute(&mut *tx)
                .await?;
            sqlx::query("DELETE FROM cards WHERE trip_id = ?")
                .bind(&trip_id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            info!("Archived card {} from bucket {}", trip_id, bucket);
            moved += 1;
        }

        Ok(moved)
    }

    /// Every archived card.
    pub async fn list_archive(&self) -> Result<Vec<Card>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT data FROM archive")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|(data,)| Ok(serde_json::from_str(data)?))
            .collect()
    }

    /// Move one card back from the archive to the active board.
    ///
    /// Returns `None` when the trip id is not archived; nothing changes in
    /// that case.
    pub async fn restore(&self, trip_id: &str) -> Result<Option<Card>> {
        let _guard = self.move_lock.lock().await;

        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM archive WHERE trip_id = ?")
            .bind(trip_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some((data,)) = row else {
            return Ok(None);
        };

        let mut tx = self.pool.begin().await?;
        sqlx::query("INSERT OR REPLACE INTO cards (trip_id, data) VALUES (?, ?)")
            .bind(trip_id)
            .bind(&data)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM archive WHERE trip_id = ?")
            .bind(trip_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!("Restored card {} from archive", trip_id);
        Ok(Some(serde_json::from_str(&data)?))
    }
}
