//! HTTP client for a running relay.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use chirp_core::ClientConfig;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Default relay URL.
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8080";

/// What the relay said about a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 200 with the acknowledgment status text.
    Sent(String),
    /// 422 with per-field messages.
    Rejected {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },
    /// Any other status, typically a transport failure on the relay side.
    Failed { status: u16, message: String },
}

#[derive(Deserialize)]
struct AckBody {
    status: String,
}

#[derive(Deserialize)]
struct RejectedBody {
    message: String,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize)]
struct FailedBody {
    message: String,
}

/// Posts chat events to a relay over HTTP.
#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "RelayClient initialized");
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_default(),
            base_url,
        }
    }

    /// `POST /messages`.
    pub async fn send_message(&self, message: &str, username: &str) -> Result<Outcome> {
        self.post("messages", json!({ "message": message, "username": username }))
            .await
    }

    /// `POST /typing`.
    pub async fn send_typing(&self, username: &str) -> Result<Outcome> {
        self.post("typing", json!({ "username": username })).await
    }

    /// `GET /broadcasting/config`.
    pub async fn client_config(&self) -> Result<ClientConfig> {
        let url = format!("{}/broadcasting/config", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach relay at {}", self.base_url))?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<Outcome> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "Posting to relay");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to reach relay at {}", self.base_url))?;

        let status = response.status();
        let text = response.text().await?;

        let outcome = if status.is_success() {
            let ack: AckBody = serde_json::from_str(&text)
                .with_context(|| format!("Unexpected response from relay: {}", text))?;
            Outcome::Sent(ack.status)
        } else if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            let body: RejectedBody = serde_json::from_str(&text)
                .with_context(|| format!("Unexpected response from relay: {}", text))?;
            Outcome::Rejected {
                message: body.message,
                errors: body.errors,
            }
        } else {
            let message = serde_json::from_str::<FailedBody>(&text)
                .map(|b| b.message)
                .unwrap_or(text);
            Outcome::Failed {
                status: status.as_u16(),
                message,
            }
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_core::{Dispatcher, Hub};
    use chirp_web::AppState;
    use std::sync::Arc;

    async fn spawn_relay() -> (String, Hub) {
        let hub = Hub::default();
        let dispatcher = Dispatcher::new(Arc::new(hub.clone()));
        let state = AppState::new(dispatcher, hub.clone(), ClientConfig::default());
        let app = chirp_web::create_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), hub)
    }

    #[tokio::test]
    async fn test_send_message_round_trip() {
        let (url, hub) = spawn_relay().await;
        let mut rx = hub.subscribe();
        let client = RelayClient::new(&url);

        let outcome = client.send_message("hello", "alice").await.unwrap();
        assert_eq!(outcome, Outcome::Sent("Message sent!".to_string()));

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.event, "message.sent");
    }

    #[tokio::test]
    async fn test_rejected_typing() {
        let (url, _hub) = spawn_relay().await;
        let client = RelayClient::new(&format!("{}/", url));

        let outcome = client.send_typing("").await.unwrap();
        match outcome {
            Outcome::Rejected { errors, .. } => {
                assert_eq!(
                    errors.get("username"),
                    Some(&vec!["The username field is required.".to_string()])
                );
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_client_config() {
        let (url, _hub) = spawn_relay().await;
        let config = RelayClient::new(&url).client_config().await.unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = RelayClient::new(&format!("http://{}", addr));
        assert!(client.send_typing("carol").await.is_err());
    }
}
