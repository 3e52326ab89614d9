//! Errors raised by the entity pool.

use thiserror::Error;

use crate::bounds::ValidationError;
use crate::model::EntityKind;

/// Pool operation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Another entity of the same kind already uses this name.
    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: EntityKind, name: String },

    /// A layout element name is already taken within its visual layout.
    #[error("layout element '{name}' already exists in visual layout '{layout}'")]
    DuplicateLayoutElement { layout: String, name: String },

    /// An id does not address an entity of this model.
    #[error("no {kind} with id {index} in this model")]
    UnknownId { kind: EntityKind, index: usize },

    /// A field bound was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type alias for pool operations.
pub type Result<T> = std::result::Result<T, ModelError>;
