//! CSV batch upload endpoint

use crate::api::{bad_request, map_error, ApiError};
use crate::import::{self, SkippedRow};
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct UploadCsvResponse {
    pub success: bool,
    /// Rows upserted by this batch
    pub count: usize,
    pub skipped: Vec<SkippedRow>,
}

/// POST /api/uploadCsv
///
/// Merge a batch of raw CSV rows (already parsed to JSON objects by the
/// client) into the store. `rows` must be an array; anything else is a 400.
/// Bad rows inside the array are skipped and enumerated in the response.
pub async fn upload_csv(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<UploadCsvResponse>, ApiError> {
    let Some(rows) = body.get("rows").and_then(Value::as_array) else {
        warn!("uploadCsv: invalid rows format");
        return Err(bad_request("Invalid rows format"));
    };

    let outcome = import::import_rows(&state.store, rows).await.map_err(map_error)?;
    Ok(Json(UploadCsvResponse {
        success: true,
        count: outcome.imported,
        skipped: outcome.skipped,
    }))
}
