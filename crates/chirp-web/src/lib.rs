//! Chirp Web Server
//!
//! Axum-based HTTP front end: chat submissions in, WebSocket fan-out.

pub mod error;
pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/messages", post(routes::chat::send_message))
        .route("/typing", post(routes::chat::send_typing))
        .route("/broadcasting/config", get(routes::config::client_config))
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let backend = state.dispatcher.broadcaster_name();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!(backend, "Chat relay listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
