//! CSV import reconciliation
//!
//! Merges a batch of raw spreadsheet rows into the card store. Rows are
//! handled independently: a bad row is skipped with a reason and never
//! aborts the batch. Import is authoritative for source-of-truth fields -
//! the built card fully replaces any prior card with the same trip id and
//! resets the manual-move override.

use crate::db::CardStore;
use bundle_common::{Bucket, Card, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Outcome of one import batch.
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    /// Rows upserted by this batch (skipped rows excluded)
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

/// A row the reconciler refused, and why.
#[derive(Debug, Serialize)]
pub struct SkippedRow {
    pub index: usize,
    pub reason: String,
}

/// Merge `rows` into the store.
///
/// Idempotent per trip id: re-importing an identical batch leaves stored
/// state unchanged and yields the same counts.
pub async fn import_rows(store: &CardStore, rows: &[Value]) -> Result<ImportOutcome> {
    info!("Received CSV rows: {}", rows.len());

    let mut imported = 0;
    let mut skipped = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let Some(fields) = row.as_object() else {
            warn!("Row {} is not an object, skipping", index + 1);
            skipped.push(SkippedRow {
                index,
                reason: "row is not an object".to_string(),
            });
            continue;
        };

        let Some(card) = card_from_row(fields) else {
            warn!("Row {} missing Trip ID, skipping", index + 1);
            skipped.push(SkippedRow {
                index,
                reason: "missing trip id".to_string(),
            });
            continue;
        };

        debug!("Card set: {} -> bucket: {}", card.trip_id, card.current_bucket);
        store.upsert(&card).await?;
        imported += 1;
    }

    info!("CSV merge imported {} rows, skipped {}", imported, skipped.len());
    Ok(ImportOutcome { imported, skipped })
}

/// Build a full card from one raw row, or `None` when the trip id is blank.
///
/// An import resyncs source-of-truth fields, so the assignee is cleared and
/// the manual-move override reset; the bucket is recomputed from the row.
pub fn card_from_row(row: &Map<String, Value>) -> Option<Card> {
    let trip_id = text_field(row, "Trip ID");
    if trip_id.trim().is_empty() {
        return None;
    }

    let accepted = count_field(row, "Items Accepted");
    let mut ready = count_field(row, "Items Ready to process");
    if ready > accepted {
        ready = accepted;
    }

    let verification_status = text_field(row, "Trip Verification Status");
    let bucket = Bucket::classify(&verification_status, ready, accepted);

    Some(Card {
        trip_id,
        traveler: text_field(row, "Traveler").trim().to_string(),
        usa_dest: text_field(row, "USA Dest"),
        items_accepted: accepted,
        items_ready_to_process: ready,
        total_bundle_weight: text_field(row, "Total Bundle Weight"),
        trip_verification_status: verification_status,
        latam_departure: text_field(row, "LATAM Departure"),
        latam_arrival: text_field(row, "LATAM Arrival"),
        ship_bundle: text_field(row, "Ship Bundle"),
        max_usa_date: text_field(row, "Max USA Date"),
        assigned_to: None,
        current_bucket: bucket,
        manually_moved: false,
    })
}

/// String field, empty when absent. Bare numbers in the sheet arrive as
/// JSON numbers and keep their printed form.
fn text_field(row: &Map<String, Value>, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Count field; missing, non-numeric, or negative values default to 0.
fn count_field(row: &Map<String, Value>, key: &str) -> u32 {
    let parsed = match row.get(key) {
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(Value::Number(n)) => n.as_i64(),
        _ => None,
    };
    parsed.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}
