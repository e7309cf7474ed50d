//! Chat submission handlers.

use axum::{body::Bytes, extract::State, Json};
use chirp_core::{validation::parse_payload, Ack};

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /messages`: validate and broadcast a chat message.
pub async fn send_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Ack>, ApiError> {
    let payload = parse_payload(&body);
    let ack = state.dispatcher.submit_message(&payload).await?;
    Ok(Json(ack))
}

/// `POST /typing`: validate and broadcast a typing notice.
pub async fn send_typing(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Ack>, ApiError> {
    let payload = parse_payload(&body);
    let ack = state.dispatcher.submit_typing(&payload).await?;
    Ok(Json(ack))
}
