//! Request payload validation.
//!
//! Payloads arrive as untyped JSON objects. Each field rule checks presence,
//! type and length in that order and stops at the first failure.

use serde_json::{Map, Value};

use crate::error::{FieldError, ValidationError};
use crate::event::{ChatMessageEvent, TypingEvent};

/// Maximum characters in a chat message.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Maximum characters in a username.
pub const MAX_USERNAME_CHARS: usize = 100;

/// Untyped request body: field name to value.
pub type Payload = Map<String, Value>;

/// Parse a request body into a [`Payload`].
///
/// Anything that is not a JSON object (empty body, malformed JSON, arrays,
/// scalars) yields an empty payload, so every required field is reported as
/// missing instead of failing the request outright.
pub fn parse_payload(body: &[u8]) -> Payload {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Payload::new(),
    }
}

/// Check a required string field of at most `max` characters.
///
/// Strings are trimmed first: a blank value counts as missing, the length
/// limit applies to the trimmed text, and the trimmed text is returned.
pub fn required_string(payload: &Payload, field: &str, max: usize) -> Result<String, FieldError> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(FieldError::Missing),
        Some(Value::Array(items)) if items.is_empty() => Err(FieldError::Missing),
        Some(Value::Object(map)) if map.is_empty() => Err(FieldError::Missing),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(FieldError::Missing)
            } else if trimmed.chars().count() > max {
                Err(FieldError::TooLong { max })
            } else {
                Ok(trimmed.to_string())
            }
        }
        Some(_) => Err(FieldError::NotAString),
    }
}

/// Validate a chat message submission.
pub fn validate_message(payload: &Payload) -> Result<ChatMessageEvent, ValidationError> {
    let mut errors = ValidationError::new();

    let message = required_string(payload, "message", MAX_MESSAGE_CHARS)
        .map_err(|e| errors.push("message", e))
        .ok();
    let username = required_string(payload, "username", MAX_USERNAME_CHARS)
        .map_err(|e| errors.push("username", e))
        .ok();

    match (message, username) {
        (Some(message), Some(username)) => Ok(ChatMessageEvent { message, username }),
        _ => Err(errors),
    }
}

/// Validate a typing notice.
pub fn validate_typing(payload: &Payload) -> Result<TypingEvent, ValidationError> {
    match required_string(payload, "username", MAX_USERNAME_CHARS) {
        Ok(username) => Ok(TypingEvent { username }),
        Err(e) => {
            let mut errors = ValidationError::new();
            errors.push("username", e);
            Err(errors)
        }
    }
}
