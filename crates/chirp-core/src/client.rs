//! Browser client configuration.
//!
//! Describes where a front end should open its WebSocket and which channel
//! and event tags it should listen for.

use serde::{Deserialize, Serialize};

use crate::event::{CHAT_CHANNEL, EVENT_TAGS};

/// Connection settings handed to browser clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub broadcaster: String,
    pub key: String,
    pub ws_host: String,
    pub ws_port: u16,
    pub wss_port: u16,
    pub force_tls: bool,
    pub enabled_transports: Vec<String>,
    pub channel: String,
    pub events: Vec<String>,
}

impl ClientConfig {
    /// Config for a relay reachable at `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            ws_host: host.into(),
            ws_port: port,
            wss_port: port,
            ..Self::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_tls(mut self, force_tls: bool) -> Self {
        self.force_tls = force_tls;
        self
    }

    /// URL a client should open for the subscriber socket.
    pub fn websocket_url(&self) -> String {
        if self.force_tls {
            format!("wss://{}:{}/ws", self.ws_host, self.wss_port)
        } else {
            format!("ws://{}:{}/ws", self.ws_host, self.ws_port)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            broadcaster: "chirp".to_string(),
            key: String::new(),
            ws_host: "localhost".to_string(),
            ws_port: 8080,
            wss_port: 8080,
            force_tls: false,
            enabled_transports: vec!["ws".to_string(), "wss".to_string()],
            channel: CHAT_CHANNEL.to_string(),
            events: EVENT_TAGS.iter().map(|tag| tag.to_string()).collect(),
        }
    }
}
