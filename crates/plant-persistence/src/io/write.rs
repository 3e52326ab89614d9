//! Durable file writes.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PersistenceError, Result};

/// Write `bytes` to a temp file next to `path`, then rename it over `path`.
///
/// Readers see either the old or the new content, never a partial file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = write_temp(path, bytes)?;
    fs::rename(&temp_path, path).map_err(|source| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}

/// Write `bytes` to a temp file next to `path`, delete `path`, then rename the
/// temp file into place.
///
/// The delete and the rename are two steps. If the rename fails the temp
/// file is left behind with the new content, and the error names it.
pub fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = write_temp(path, bytes)?;
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
        Err(error) => {
            let _ = fs::remove_file(&temp_path);
            return Err(PersistenceError::io("delete", path, error));
        }
    }
    fs::rename(&temp_path, path).map_err(|source| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Replaced file");
    Ok(())
}

fn write_temp(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    let temp_path = temp_path_for(path);

    let mut file = File::create(&temp_path)
        .map_err(|e| PersistenceError::io("create", temp_path.clone(), e))?;
    file.write_all(bytes)
        .map_err(|e| PersistenceError::io("write", temp_path.clone(), e))?;
    file.sync_all()
        .map_err(|e| PersistenceError::io("sync", temp_path.clone(), e))?;

    Ok(temp_path)
}

/// `model.xml` becomes `model.xml.tmp` in the same directory.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("file"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn atomic_write_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.xml");
        write_atomic(&path, b"old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn replace_file_creates_and_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.json");
        replace_file(&path, b"[]").unwrap();
        replace_file(&path, b"[1]").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"[1]");
        assert!(!dir.path().join("orders.json.tmp").exists());
    }

    #[test]
    fn write_into_missing_directory_fails_with_io() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("model.xml");
        let error = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(error, PersistenceError::Io { operation: "create", .. }));
    }
}
