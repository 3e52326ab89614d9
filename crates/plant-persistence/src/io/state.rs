//! JSON files for frequently rewritten working state.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::write::replace_file;
use crate::error::{PersistenceError, Result};

/// A typed JSON document stored with [`replace_file`].
#[derive(Debug, Clone)]
pub struct JsonStateFile<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> JsonStateFile<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored state, or `None` if the file does not exist.
    pub fn load(&self) -> Result<Option<T>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(PersistenceError::io("read", self.path.clone(), error)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| PersistenceError::StateFile {
                path: self.path.clone(),
                source,
            })
    }

    pub fn store(&self, state: &T) -> Result<()> {
        let bytes =
            serde_json::to_vec_pretty(state).map_err(|source| PersistenceError::StateFile {
                path: self.path.clone(),
                source,
            })?;
        replace_file(&self.path, &bytes)
    }

    /// Delete the file. Removing an absent file is not an error.
    pub fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(PersistenceError::io("delete", self.path.clone(), error)),
        }
    }
}
