//! Codec error types.

use plant_model::ValidationError;
use thiserror::Error;

/// A document could not be encoded or decoded.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The byte stream is not a well-formed document.
    #[error("Malformed document: {message}")]
    Malformed { message: String },

    /// The document does not have the expected root element.
    #[error("Unexpected root element '{found}', expected '{expected}'")]
    UnexpectedRoot {
        found: String,
        expected: &'static str,
    },

    /// A mandatory attribute is absent.
    #[error("Element '{element}' is missing attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// An attribute value cannot be parsed.
    #[error("Element '{element}' has invalid {attribute} '{value}': {reason}")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
        reason: String,
    },

    /// A decoded value violates a descriptor bound.
    #[error("Invalid value in document: {0}")]
    Validation(#[from] ValidationError),

    /// Reading or writing the underlying buffer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
