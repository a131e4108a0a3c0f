//! Card read and write endpoints

use crate::api::{bad_request, map_error, ApiError};
use crate::AppState;
use axum::{extract::State, Json};
use bundle_common::Card;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct CardsResponse {
    pub cards: Vec<Card>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// GET /api/cards
///
/// Every active card on the board.
pub async fn get_cards(State(state): State<AppState>) -> Result<Json<CardsResponse>, ApiError> {
    let cards = state.store.get_all().await.map_err(map_error)?;
    Ok(Json(CardsResponse { cards }))
}

/// POST /api/card
///
/// Create or fully replace a card. The body carries the card under a
/// `card` key; a missing or malformed card is a 400.
pub async fn post_card(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Some(card_value) = body.get("card") else {
        return Err(bad_request("Invalid card"));
    };

    let card: Card = serde_json::from_value(card_value.clone())
        .map_err(|e| bad_request(format!("Invalid card: {}", e)))?;

    let card = state.lifecycle.upsert_card(card).await.map_err(map_error)?;
    info!("Card saved: {}", card.trip_id);
    Ok(Json(SuccessResponse { success: true }))
}
