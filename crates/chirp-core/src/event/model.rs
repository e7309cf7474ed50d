//! Event records published on the chat channel.

use serde::{Deserialize, Serialize};

/// A chat line posted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageEvent {
    pub message: String,
    pub username: String,
}

impl ChatMessageEvent {
    pub fn new(message: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            username: username.into(),
        }
    }
}

/// A user is composing a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingEvent {
    pub username: String,
}

impl TypingEvent {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
