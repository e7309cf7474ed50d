//! WebSocket subscribers for the chat channel.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use chirp_core::event::CHAT_CHANNEL;
use futures::{sink::SinkExt, stream::StreamExt};
use tracing::{debug, info, warn};

use crate::state::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.hub.subscribe();

    let receiver_count = state.hub.receiver_count();
    info!(receiver_count, "WebSocket subscriber connected");

    // Forward chat envelopes to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(envelope) = rx.recv().await {
            if envelope.channel != CHAT_CHANNEL {
                continue;
            }
            let json = match serde_json::to_string(&envelope) {
                Ok(json) => json,
                Err(e) => {
                    warn!(error = %e, "Failed to encode envelope");
                    continue;
                }
            };
            debug!(event = %envelope.event, "Sending envelope to WebSocket client");
            if sender.send(Message::Text(json.into())).await.is_err() {
                debug!("WebSocket send failed, client disconnected");
                break;
            }
        }
    });

    // Subscribers only listen; anything but Close is ignored
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                debug!("WebSocket client sent close frame");
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    info!("WebSocket subscriber disconnected");
}
