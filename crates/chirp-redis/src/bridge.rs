//! Forward Redis pub/sub messages into a local hub.

use std::time::Duration;

use chirp_core::Hub;
use futures::StreamExt;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::broadcast::decode_envelope;
use crate::client::{channel_key, RedisResult};

/// Delay before resubscribing after the pub/sub connection drops.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// A running bridge task.
pub struct Bridge {
    pub handle: JoinHandle<()>,
    /// Fires once the first `SUBSCRIBE` has been acknowledged.
    pub ready: oneshot::Receiver<()>,
}

/// Spawn a task that relays `<prefix><channel>` into `hub` until aborted.
pub fn spawn_bridge(client: redis::Client, prefix: &str, channel: &str, hub: Hub) -> Bridge {
    let key = channel_key(prefix, channel);
    let (ready_tx, ready) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let mut ready_tx = Some(ready_tx);
        loop {
            match forward(&client, &key, &hub, &mut ready_tx).await {
                Ok(()) => warn!(channel = %key, "Redis subscription ended, reconnecting"),
                Err(e) => warn!(channel = %key, error = %e, "Redis subscription failed, reconnecting"),
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    });
    Bridge { handle, ready }
}

/// Subscribe once and forward messages until the stream ends.
async fn forward(
    client: &redis::Client,
    key: &str,
    hub: &Hub,
    ready: &mut Option<oneshot::Sender<()>>,
) -> RedisResult<()> {
    let mut pubsub = client.get_async_pubsub().await?;
    pubsub.subscribe(key).await?;
    info!(channel = %key, "Subscribed to Redis channel");
    if let Some(tx) = ready.take() {
        let _ = tx.send(());
    }

    let mut messages = pubsub.on_message();
    while let Some(msg) = messages.next().await {
        let payload = match msg.get_payload::<String>() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Skipping non-text Redis message");
                continue;
            }
        };
        match decode_envelope(&payload) {
            Ok(envelope) => {
                let delivered = hub.send(envelope);
                debug!(delivered, "Forwarded Redis message to subscribers");
            }
            Err(e) => warn!(error = %e, "Skipping malformed envelope"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RedisBroadcaster;
    use chirp_core::Broadcaster;
    use serde_json::json;

    #[tokio::test]
    async fn test_bridge_forwards_after_ready() {
        // Only runs when a Redis server is provided.
        let Ok(url) = std::env::var("CHIRP_TEST_REDIS_URL") else {
            return;
        };
        let (client, pool) = crate::init_pool(&url).await.unwrap();
        let hub = Hub::default();
        let mut rx = hub.subscribe();

        let bridge = spawn_bridge(client, "chirp-bridge-test:", "chat", hub.clone());
        tokio::time::timeout(Duration::from_secs(5), bridge.ready)
            .await
            .unwrap()
            .unwrap();

        // The bridge is subscribed, so the very first publish is delivered.
        let broadcaster = RedisBroadcaster::new(pool, "chirp-bridge-test:");
        broadcaster
            .publish("chat", "user.typing", json!({"username": "carol"}))
            .await
            .unwrap();

        let envelope = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(envelope.event, "user.typing");
        assert_eq!(envelope.data, json!({"username": "carol"}));

        bridge.handle.abort();
    }
}
