//! Centralized error types for the relay.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Absent, `null`, or a string that is blank once trimmed.
    Missing,
    /// Present but not a JSON string.
    NotAString,
    /// Longer than the allowed number of characters.
    TooLong { max: usize },
}

impl FieldError {
    /// Human readable message for `field`.
    pub fn describe(&self, field: &str) -> String {
        match self {
            Self::Missing => format!("The {field} field is required."),
            Self::NotAString => format!("The {field} field must be a string."),
            Self::TooLong { max } => {
                format!("The {field} field must not be greater than {max} characters.")
            }
        }
    }
}

/// One or more request fields failed validation.
///
/// Fields are kept in declaration order so the first reported error is stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    fields: Vec<(&'static str, FieldError)>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, error: FieldError) {
        self.fields.push((field, error));
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The failure recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, error)| error)
    }

    pub fn fields(&self) -> impl Iterator<Item = &(&'static str, FieldError)> {
        self.fields.iter()
    }

    /// Field name to list of messages, as reported to HTTP callers.
    pub fn messages(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut map: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for (field, error) in &self.fields {
            map.entry(*field).or_default().push(error.describe(field));
        }
        map
    }

    /// Summary line: the first message plus a count of the rest.
    pub fn summary(&self) -> String {
        let Some((field, error)) = self.fields.first() else {
            return "The given data was invalid.".to_string();
        };
        let first = error.describe(field);
        match self.fields.len() - 1 {
            0 => first,
            1 => format!("{first} (and 1 more error)"),
            n => format!("{first} (and {n} more errors)"),
        }
    }

    /// Serializable body for a 422 response.
    pub fn to_body(&self) -> ValidationErrorBody {
        ValidationErrorBody {
            message: self.summary(),
            errors: self.messages(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationError {}

/// Wire shape of a validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorBody {
    pub message: String,
    pub errors: BTreeMap<&'static str, Vec<String>>,
}

/// The broadcast transport could not take the event.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Broadcast relay unavailable: {0}")]
    Unavailable(String),

    #[error("Broadcast publish timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

impl TransportError {
    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Outcome of a failed submission.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result type for dispatcher operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_remaining_errors() {
        let mut err = ValidationError::new();
        err.push("message", FieldError::Missing);
        assert_eq!(err.summary(), "The message field is required.");

        err.push("username", FieldError::TooLong { max: 100 });
        assert_eq!(
            err.summary(),
            "The message field is required. (and 1 more error)"
        );
    }

    #[test]
    fn test_messages_grouped_by_field() {
        let mut err = ValidationError::new();
        err.push("username", FieldError::NotAString);
        let messages = err.messages();
        assert_eq!(
            messages.get("username"),
            Some(&vec!["The username field must be a string.".to_string()])
        );
        assert!(messages.get("message").is_none());
    }

    #[test]
    fn test_body_serializes() {
        let mut err = ValidationError::new();
        err.push("message", FieldError::TooLong { max: 500 });
        let json = serde_json::to_value(err.to_body()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": "The message field must not be greater than 500 characters.",
                "errors": {
                    "message": ["The message field must not be greater than 500 characters."]
                }
            })
        );
    }
}
