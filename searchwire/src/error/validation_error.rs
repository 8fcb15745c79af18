//! Decoding errors for response and request bodies.

use thiserror::Error;

/// Errors raised when a body cannot be interpreted in the expected format.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A request-body type could not be built from its JSON form.
    #[error("could not deserialise json into {type_name}")]
    InvalidBody {
        /// Name of the request-body type.
        type_name: &'static str,
        /// The underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The body is not in the expected encoding.
    #[error("Unexpected content type: expected {expected}, got {actual}")]
    ContentTypeMismatch {
        /// The expected content description.
        expected: String,
        /// What was received.
        actual: String,
    },

    /// Empty body where content was expected.
    #[error("Empty response body")]
    EmptyBody,
}

impl ValidationError {
    /// Returns `true` if this is a parsing error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_) | Self::InvalidBody { .. })
    }
}
