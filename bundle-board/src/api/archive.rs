//! Archive endpoints: completed sweep, listing, restore

use crate::api::{bad_request, map_error, ApiError};
use crate::AppState;
use axum::{extract::State, Json};
use bundle_common::Card;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ClearCompletedResponse {
    pub success: bool,
    pub archived: u64,
}

#[derive(Debug, Serialize)]
pub struct ArchiveResponse {
    pub archived: Vec<Card>,
}

#[derive(Debug, Serialize)]
pub struct RestoreResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/clearCompleted
///
/// Sweep every card in the terminal "Bundle Completed" bucket into the
/// archive.
pub async fn clear_completed(
    State(state): State<AppState>,
) -> Result<Json<ClearCompletedResponse>, ApiError> {
    let archived = state.lifecycle.sweep_completed().await.map_err(map_error)?;
    Ok(Json(ClearCompletedResponse { success: true, archived }))
}

/// GET /api/archive
///
/// Every archived card.
pub async fn get_archive(State(state): State<AppState>) -> Result<Json<ArchiveResponse>, ApiError> {
    let archived = state.store.list_archive().await.map_err(map_error)?;
    Ok(Json(ArchiveResponse { archived }))
}

/// POST /api/restoreArchive
///
/// Move one card back from the archive to the active board. A missing
/// `tripId` is a 400; an unknown trip id is a normal no-op result, not an
/// error.
pub async fn restore_archive(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<RestoreResponse>, ApiError> {
    let trip_id = body
        .get("tripId")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let Some(trip_id) = trip_id else {
        return Err(bad_request("tripId is required"));
    };

    match state.lifecycle.restore_from_archive(trip_id).await.map_err(map_error)? {
        Some(card) => Ok(Json(RestoreResponse {
            success: true,
            card: Some(card),
            error: None,
        })),
        None => Ok(Json(RestoreResponse {
            success: false,
            card: None,
            error: Some(format!("tripId {} not found in archive", trip_id)),
        })),
    }
}
