//! Validate submissions and hand them to the broadcaster.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::broadcast::Broadcaster;
use crate::error::{DispatchResult, TransportError};
use crate::event::ChatEvent;
use crate::validation::{self, Payload};

/// Default upper bound on a single publish call.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(3);

/// Acknowledgment returned once an event has been published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub status: &'static str,
}

impl Ack {
    pub const MESSAGE_SENT: Ack = Ack {
        status: "Message sent!",
    };
    pub const TYPING_SENT: Ack = Ack {
        status: "Typing event sent!",
    };
}

/// Stateless front door for chat submissions.
///
/// Cloning is cheap; clones share the same broadcaster.
#[derive(Clone)]
pub struct Dispatcher {
    broadcaster: Arc<dyn Broadcaster>,
    publish_timeout: Duration,
}

impl Dispatcher {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            broadcaster,
            publish_timeout: DEFAULT_PUBLISH_TIMEOUT,
        }
    }

    /// Override how long a publish may take before it is reported as failed.
    pub fn with_publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout = timeout;
        self
    }

    pub fn publish_timeout(&self) -> Duration {
        self.publish_timeout
    }

    pub fn broadcaster_name(&self) -> &'static str {
        self.broadcaster.name()
    }

    /// Validate and publish a chat message.
    pub async fn submit_message(&self, payload: &Payload) -> DispatchResult<Ack> {
        let event = validation::validate_message(payload).inspect_err(|e| {
            debug!(error = %e, "Rejected chat message");
        })?;
        self.publish(event.into()).await?;
        Ok(Ack::MESSAGE_SENT)
    }

    /// Validate and publish a typing notice.
    pub async fn submit_typing(&self, payload: &Payload) -> DispatchResult<Ack> {
        let event = validation::validate_typing(payload).inspect_err(|e| {
            debug!(error = %e, "Rejected typing notice");
        })?;
        self.publish(event.into()).await?;
        Ok(Ack::TYPING_SENT)
    }

    /// Publish an already validated event, bounded by the publish timeout.
    pub async fn publish(&self, event: ChatEvent) -> Result<(), TransportError> {
        let data = event.data()?;
        let publish = self.broadcaster.publish(event.channel(), event.tag(), data);

        match tokio::time::timeout(self.publish_timeout, publish).await {
            Ok(Ok(())) => {
                info!(
                    event = event.tag(),
                    channel = event.channel(),
                    username = event.username(),
                    backend = self.broadcaster.name(),
                    "Event published"
                );
                Ok(())
            }
            Ok(Err(e)) => {
                warn!(event = event.tag(), error = %e, "Publish failed");
                Err(e)
            }
            Err(_) => {
                warn!(
                    event = event.tag(),
                    timeout = ?self.publish_timeout,
                    "Publish timed out"
                );
                Err(TransportError::Timeout(self.publish_timeout))
            }
        }
    }
}
