//! Redis pub/sub broadcaster.
//!
//! Each event is published as a JSON envelope on `<prefix><channel>`. Any
//! relay process running [`crate::bridge`] on the same Redis receives it and
//! fans it out to its own WebSocket subscribers.

use async_trait::async_trait;
use chirp_core::{Broadcaster, Envelope, TransportError};
use redis::AsyncCommands;
use tracing::debug;

use crate::client::{channel_key, RedisPool, RedisResult};

/// Publishes envelopes with `PUBLISH`.
#[derive(Clone)]
pub struct RedisBroadcaster {
    pool: RedisPool,
    prefix: String,
}

impl RedisBroadcaster {
    pub fn new(pool: RedisPool, prefix: impl Into<String>) -> Self {
        Self {
            pool,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    async fn publish_envelope(&self, envelope: &Envelope) -> RedisResult<i64> {
        let key = channel_key(&self.prefix, &envelope.channel);
        let json = encode_envelope(envelope)?;
        let mut conn = self.pool.clone();
        let receivers: i64 = conn.publish(&key, json).await?;
        Ok(receivers)
    }
}

#[async_trait]
impl Broadcaster for RedisBroadcaster {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), TransportError> {
        let envelope = Envelope::new(channel, event, payload);
        let receivers = self.publish_envelope(&envelope).await?;
        debug!(channel, event, receivers, "Published to Redis");
        check_delivered(&channel_key(&self.prefix, channel), receivers)
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

/// The relay's own bridge is always subscribed, so a `PUBLISH` that reached
/// nobody means the event went nowhere.
pub fn check_delivered(key: &str, receivers: i64) -> Result<(), TransportError> {
    if receivers > 0 {
        Ok(())
    } else {
        Err(TransportError::unavailable(format!(
            "no relay is subscribed to Redis channel {key}"
        )))
    }
}

/// Encode an envelope for the wire.
pub fn encode_envelope(envelope: &Envelope) -> RedisResult<String> {
    Ok(serde_json::to_string(envelope)?)
}

/// Decode an envelope received from Redis.
pub fn decode_envelope(payload: &str) -> RedisResult<Envelope> {
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_wire_format() {
        let envelope = Envelope::new("chat", "message.sent", json!({"message": "hi", "username": "bob"}));
        let encoded = encode_envelope(&envelope).unwrap();
        assert_eq!(
            encoded,
            r#"{"channel":"chat","event":"message.sent","data":{"message":"hi","username":"bob"}}"#
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_envelope("hello").is_err());
        assert!(decode_envelope(r#"{"channel":"chat"}"#).is_err());
    }

    #[test]
    fn test_publish_without_subscribers_is_not_delivered() {
        assert!(check_delivered("chat", 1).is_ok());
        assert!(check_delivered("chat", 3).is_ok());

        let err = check_delivered("chirp:chat", 0).unwrap_err();
        match err {
            TransportError::Unavailable(msg) => assert!(msg.contains("chirp:chat")),
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unheard_publish_against_live_redis() {
        // Only runs when a Redis server is provided.
        let Ok(url) = std::env::var("CHIRP_TEST_REDIS_URL") else {
            return;
        };
        let (_client, pool) = crate::init_pool(&url).await.unwrap();
        let broadcaster = RedisBroadcaster::new(pool, "chirp-test:");
        // Nothing is subscribed to this prefix, so the event must not count as sent.
        let err = broadcaster
            .publish("chat", "user.typing", json!({"username": "carol"}))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Unavailable(_)));
    }
}
