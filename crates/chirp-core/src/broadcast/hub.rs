//! In-process broadcast hub.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::Broadcaster;
use crate::error::TransportError;
use crate::event::Envelope;

/// Default number of envelopes a slow subscriber may fall behind.
pub const DEFAULT_CAPACITY: usize = 100;

/// Fans envelopes out to every live [`HubReceiver`].
#[derive(Clone, Debug)]
pub struct Hub {
    tx: broadcast::Sender<Envelope>,
}

impl Hub {
    /// Create a hub with room for `capacity` buffered envelopes per receiver.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to envelopes published from now on.
    pub fn subscribe(&self) -> HubReceiver {
        HubReceiver {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Push an envelope to all subscribers, returning how many received it.
    pub fn send(&self, envelope: Envelope) -> usize {
        // `send` only errors when nobody is listening.
        self.tx.send(envelope).unwrap_or(0)
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl Broadcaster for Hub {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), TransportError> {
        let delivered = self.send(Envelope::new(channel, event, payload));
        debug!(channel, event, delivered, "Envelope fanned out");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Subscriber handle returned by [`Hub::subscribe`].
#[derive(Debug)]
pub struct HubReceiver {
    rx: broadcast::Receiver<Envelope>,
}

impl HubReceiver {
    /// Wait for the next envelope.
    ///
    /// Envelopes dropped because this receiver lagged are skipped. Returns
    /// `None` once the hub is gone.
    pub async fn recv(&mut self) -> Option<Envelope> {
        loop {
            match self.rx.recv().await {
                Ok(envelope) => return Some(envelope),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Subscriber lagged, skipping envelopes");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Take an envelope if one is already buffered.
    pub fn try_recv(&mut self) -> Option<Envelope> {
        loop {
            match self.rx.try_recv() {
                Ok(envelope) => return Some(envelope),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let hub = Hub::default();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();
        assert_eq!(hub.receiver_count(), 2);

        hub.publish("chat", "user.typing", json!({"username": "carol"}))
            .await
            .unwrap();

        for rx in [&mut a, &mut b] {
            let envelope = rx.recv().await.unwrap();
            assert_eq!(envelope.channel, "chat");
            assert_eq!(envelope.event, "user.typing");
            assert_eq!(envelope.data, json!({"username": "carol"}));
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_succeeds() {
        let hub = Hub::default();
        assert!(hub.publish("chat", "user.typing", json!({})).await.is_ok());
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let hub = Hub::default();
        hub.publish("chat", "user.typing", json!({"username": "early"}))
            .await
            .unwrap();

        let mut rx = hub.subscribe();
        assert!(rx.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_lagged_receiver_keeps_receiving() {
        let hub = Hub::new(2);
        let mut rx = hub.subscribe();
        for i in 0..5 {
            hub.send(Envelope::new("chat", "user.typing", json!({"username": i.to_string()})));
        }

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.data, json!({"username": "3"}));
        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.data, json!({"username": "4"}));
    }

    #[tokio::test]
    async fn test_recv_ends_when_hub_dropped() {
        let hub = Hub::default();
        let mut rx = hub.subscribe();
        drop(hub);
        assert!(rx.recv().await.is_none());
    }
}
