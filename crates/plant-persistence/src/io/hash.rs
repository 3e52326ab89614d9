//! SHA-256 digests for snapshots and backups.

use std::fs::File;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{PersistenceError, Result};

/// Hex-encoded SHA-256 of a file, streamed.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| PersistenceError::io("read", path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| PersistenceError::io("read", path, e))?;
    Ok(hex::encode(hasher.finalize()))
}

/// Hex-encoded SHA-256 of an in-memory buffer.
pub fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HELLO_DIGEST: &str = "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f";

    #[test]
    fn file_and_buffer_digests_agree() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Hello, World!").unwrap();
        file.flush().unwrap();

        assert_eq!(compute_file_hash(file.path()).unwrap(), HELLO_DIGEST);
        assert_eq!(hash_bytes(b"Hello, World!"), HELLO_DIGEST);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = compute_file_hash(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(error, PersistenceError::Io { operation: "read", .. }));
    }
}
