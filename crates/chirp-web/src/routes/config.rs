//! Client configuration endpoint.

use axum::{extract::State, Json};
use chirp_core::ClientConfig;

use crate::state::AppState;

pub async fn client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(state.client_config.clone())
}
