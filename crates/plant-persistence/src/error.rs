//! Persistence error types.
//!
//! Errors fall into two families. Structural errors mean the document or
//! the model cannot be turned into the other; nothing was loaded. I/O errors
//! mean the filesystem refused an operation. Both carry user-facing messages
//! and optional remediation hints.

use std::path::PathBuf;

use plant_descriptor::CodecError;
use plant_model::{EntityKind, ModelError, ValidationError};
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The document was written under a different schema version.
    #[error("Model version {found:?} is not supported (expected {supported})")]
    VersionMismatch {
        found: String,
        supported: &'static str,
    },

    /// Two entities of the same kind share a name.
    #[error("Duplicate {kind} name '{name}'")]
    DuplicateName { kind: EntityKind, name: String },

    /// A hard reference names an entity that does not exist.
    #[error("{kind} '{name}' references unknown {expected} '{target}'")]
    UnresolvedReference {
        kind: EntityKind,
        name: String,
        target: String,
        expected: &'static str,
    },

    /// The model rejected an entity while it was being populated.
    #[error("Invalid model content: {0}")]
    InvalidModel(ModelError),

    /// The document could not be encoded or decoded.
    #[error("Failed to process model document: {path}")]
    Codec {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    /// The data directory cannot be created or is not a directory.
    #[error("Data directory unavailable: {path}")]
    DataDirectory { path: PathBuf, reason: String },

    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary file could not be moved over the target.
    #[error("Failed to complete write of {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON state file could not be encoded or decoded.
    #[error("Invalid state file: {path}")]
    StateFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The store configuration file is malformed.
    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl PersistenceError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by document or model content rather than the
    /// filesystem.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::VersionMismatch { .. }
                | Self::DuplicateName { .. }
                | Self::UnresolvedReference { .. }
                | Self::InvalidModel(_)
                | Self::Codec { .. }
        )
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::VersionMismatch { found, supported } => {
                if found.is_empty() {
                    format!("The model file has no version tag (this version reads {supported}).")
                } else {
                    format!(
                        "The model file has version {found}, but this version only reads {supported}."
                    )
                }
            }
            Self::DuplicateName { kind, name } => {
                format!("The model contains more than one {kind} named '{name}'.")
            }
            Self::UnresolvedReference {
                kind,
                name,
                target,
                expected,
            } => {
                format!("The {kind} '{name}' refers to a {expected} '{target}' that does not exist.")
            }
            Self::InvalidModel(source) => format!("The model content is invalid: {source}."),
            Self::Codec { path, source } => {
                format!("The file at {} could not be processed: {source}", path.display())
            }
            Self::DataDirectory { path, reason } => {
                format!("The data directory {} cannot be used: {reason}", path.display())
            }
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::AtomicWriteFailed {
                temp_path,
                target_path,
                ..
            } => {
                format!(
                    "Could not move {} into place at {}.",
                    temp_path.display(),
                    target_path.display()
                )
            }
            Self::StateFile { path, source } => {
                format!("The state file at {} is unreadable: {source}", path.display())
            }
            Self::Config { path, reason } => {
                format!("The configuration file {} is invalid: {reason}", path.display())
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::VersionMismatch { .. } => {
                Some("Convert the file with the tool that wrote it, or restore a backup.".into())
            }
            Self::DuplicateName { .. } | Self::UnresolvedReference { .. } => {
                Some("Fix the model file, or restore a backup from the backups directory.".into())
            }
            Self::InvalidModel(_) => None,
            Self::Codec { .. } => Some("Check that the file is a plant model document.".into()),
            Self::DataDirectory { .. } => {
                Some("Remove the conflicting file or choose another home directory.".into())
            }
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => Some(
                "The previous content may survive in the temporary file; free up disk space and retry."
                    .into(),
            ),
            Self::StateFile { .. } => Some("Delete the state file to start over.".into()),
            Self::Config { .. } => Some("Fix the TOML syntax or remove the file.".into()),
        }
    }
}

impl From<ModelError> for PersistenceError {
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::DuplicateName { kind, name } => Self::DuplicateName { kind, name },
            other => Self::InvalidModel(other),
        }
    }
}

impl From<ValidationError> for PersistenceError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidModel(ModelError::Validation(error))
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
