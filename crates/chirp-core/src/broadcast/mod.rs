//! Broadcasting seam.
//!
//! The dispatcher hands every accepted event to a [`Broadcaster`]. Backends
//! decide how the event reaches subscribers: the in-process [`Hub`] fans out
//! over a tokio broadcast channel, other crates publish to an external relay.

pub mod hub;

use async_trait::async_trait;

use crate::error::TransportError;

pub use hub::{Hub, HubReceiver};

/// Publishes an event to every current subscriber of a channel.
///
/// A publish either reaches the relay or fails with a [`TransportError`];
/// there is no partial state. Having zero subscribers is not an error.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), TransportError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
