//! Chat events and the envelope subscribers receive.

pub mod model;

use serde::{Deserialize, Serialize};

pub use model::{ChatMessageEvent, TypingEvent};

/// The only broadcast channel.
pub const CHAT_CHANNEL: &str = "chat";

/// Tag for [`ChatMessageEvent`].
pub const MESSAGE_SENT: &str = "message.sent";

/// Tag for [`TypingEvent`].
pub const USER_TYPING: &str = "user.typing";

/// Every event kind a subscriber can receive on [`CHAT_CHANNEL`].
pub const EVENT_TAGS: &[&str] = &[MESSAGE_SENT, USER_TYPING];

/// An event ready to be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    MessageSent(ChatMessageEvent),
    UserTyping(TypingEvent),
}

impl ChatEvent {
    /// Wire discriminator for this event.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MessageSent(_) => MESSAGE_SENT,
            Self::UserTyping(_) => USER_TYPING,
        }
    }

    /// Channel this event is broadcast on.
    pub fn channel(&self) -> &'static str {
        CHAT_CHANNEL
    }

    /// Payload as a JSON value, without the tag.
    pub fn data(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::MessageSent(event) => serde_json::to_value(event),
            Self::UserTyping(event) => serde_json::to_value(event),
        }
    }

    /// Username of whoever triggered the event.
    pub fn username(&self) -> &str {
        match self {
            Self::MessageSent(event) => &event.username,
            Self::UserTyping(event) => &event.username,
        }
    }
}

impl From<ChatMessageEvent> for ChatEvent {
    fn from(event: ChatMessageEvent) -> Self {
        Self::MessageSent(event)
    }
}

impl From<TypingEvent> for ChatEvent {
    fn from(event: TypingEvent) -> Self {
        Self::UserTyping(event)
    }
}

/// What a subscriber receives: channel, tag and payload in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub channel: String,
    pub event: String,
    pub data: serde_json::Value,
}

impl Envelope {
    pub fn new(channel: &str, event: &str, data: serde_json::Value) -> Self {
        Self {
            channel: channel.to_string(),
            event: event.to_string(),
            data,
        }
    }

    /// Decode the payload back into a typed event, if the tag is known.
    pub fn decode(&self) -> Option<ChatEvent> {
        match self.event.as_str() {
            MESSAGE_SENT => serde_json::from_value(self.data.clone())
                .ok()
                .map(ChatEvent::MessageSent),
            USER_TYPING => serde_json::from_value(self.data.clone())
                .ok()
                .map(ChatEvent::UserTyping),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_sent_wire_shape() {
        let event = ChatEvent::from(ChatMessageEvent::new("hello", "alice"));
        assert_eq!(event.tag(), "message.sent");
        assert_eq!(event.channel(), "chat");
        assert_eq!(
            event.data().unwrap(),
            json!({"message": "hello", "username": "alice"})
        );
    }

    #[test]
    fn test_typing_wire_shape() {
        let event = ChatEvent::from(TypingEvent::new("carol"));
        assert_eq!(event.tag(), "user.typing");
        assert_eq!(event.data().unwrap(), json!({"username": "carol"}));
    }

    #[test]
    fn test_envelope_json() {
        let envelope = Envelope::new(CHAT_CHANNEL, USER_TYPING, json!({"username": "carol"}));
        let text = serde_json::to_string(&envelope).unwrap();
        assert_eq!(
            text,
            r#"{"channel":"chat","event":"user.typing","data":{"username":"carol"}}"#
        );
    }

    #[test]
    fn test_envelope_decode() {
        let envelope = Envelope::new(
            CHAT_CHANNEL,
            MESSAGE_SENT,
            json!({"message": "hi", "username": "bob"}),
        );
        assert_eq!(
            envelope.decode(),
            Some(ChatEvent::MessageSent(ChatMessageEvent::new("hi", "bob")))
        );

        let unknown = Envelope::new(CHAT_CHANNEL, "user.left", json!({}));
        assert_eq!(unknown.decode(), None);
    }
}
