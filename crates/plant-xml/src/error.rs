//! Low-level XML errors and their mapping onto [`CodecError`].

use plant_descriptor::CodecError;
use quick_xml::escape::EscapeError;
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors raised while reading or writing XML events.
#[derive(Debug, Error)]
pub(crate) enum XmlError {
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{0}")]
    Attribute(#[from] AttrError),

    #[error("{0}")]
    Escape(#[from] EscapeError),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Well-formed events that do not form a single-rooted tree.
    #[error("{0}")]
    Structure(String),
}

impl From<XmlError> for CodecError {
    fn from(error: XmlError) -> Self {
        match error {
            XmlError::Io(source) => CodecError::Io(source),
            other => CodecError::Malformed {
                message: other.to_string(),
            },
        }
    }
}
