//! Chirp Core Library
//!
//! Event records, validation and the broadcasting seam for the chat relay.

pub mod broadcast;
pub mod client;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod validation;

pub use broadcast::{Broadcaster, Hub, HubReceiver};
pub use client::ClientConfig;
pub use dispatcher::{Ack, Dispatcher};
pub use error::{DispatchError, DispatchResult, FieldError, TransportError, ValidationError};
pub use event::{ChatEvent, ChatMessageEvent, Envelope, TypingEvent};
