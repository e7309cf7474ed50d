//! Chirp Redis Relay
//!
//! Publishes chat events through Redis pub/sub so several relay processes
//! can share one fan-out.

pub mod bridge;
pub mod broadcast;
pub mod client;

pub use bridge::{spawn_bridge, Bridge};
pub use broadcast::RedisBroadcaster;
pub use client::{RedisError, RedisPool, RedisResult, init_pool};
