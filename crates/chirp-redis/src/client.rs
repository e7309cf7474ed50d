//! Redis connection management.

use chirp_core::TransportError;
use redis::aio::ConnectionManager;
use thiserror::Error;

/// Redis error types.
#[derive(Error, Debug)]
pub enum RedisError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for Redis operations.
pub type RedisResult<T> = Result<T, RedisError>;

impl From<RedisError> for TransportError {
    fn from(err: RedisError) -> Self {
        match err {
            RedisError::Connection(e) => TransportError::unavailable(e.to_string()),
            RedisError::Serialization(e) => TransportError::Encode(e),
        }
    }
}

/// Shared Redis handle. `ConnectionManager` multiplexes and reconnects on its
/// own; callers clone it to get a mutable handle for each command.
pub type RedisPool = ConnectionManager;

/// Open a client and a managed connection from a URL.
///
/// Example URL: `redis://127.0.0.1:6379`
pub async fn init_pool(redis_url: &str) -> RedisResult<(redis::Client, RedisPool)> {
    let client = redis::Client::open(redis_url)?;
    let manager = ConnectionManager::new(client.clone()).await?;
    Ok((client, manager))
}

/// Redis channel name for a relay channel.
pub fn channel_key(prefix: &str, channel: &str) -> String {
    format!("{prefix}{channel}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_key() {
        assert_eq!(channel_key("", "chat"), "chat");
        assert_eq!(channel_key("chirp:", "chat"), "chirp:chat");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(redis::Client::open("not a url").is_err());
    }

    #[test]
    fn test_serialization_error_maps_to_encode() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let transport: TransportError = RedisError::from(err).into();
        assert!(matches!(transport, TransportError::Encode(_)));
    }
}
