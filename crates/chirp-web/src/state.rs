//! Application state.

use chirp_core::{ClientConfig, Dispatcher, Hub};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Validates submissions and publishes them.
    pub dispatcher: Dispatcher,
    /// Local fan-out that WebSocket subscribers listen on.
    pub hub: Hub,
    pub client_config: ClientConfig,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, hub: Hub, client_config: ClientConfig) -> Self {
        Self {
            dispatcher,
            hub,
            client_config,
        }
    }
}
