//! Store configuration, read from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, Result};

/// Where the durable store keeps its files.
///
/// ```toml
/// home = "/var/lib/plant"
/// data_dir = "data"
/// snapshot_file = "model.xml"
/// backup_dir = "backups"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Application home directory.
    pub home: PathBuf,
    /// Data directory, relative to `home` unless absolute.
    pub data_dir: PathBuf,
    /// Snapshot file name inside the data directory.
    pub snapshot_file: String,
    /// Backup directory, relative to the data directory unless absolute.
    pub backup_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            home: PathBuf::from("."),
            data_dir: PathBuf::from("data"),
            snapshot_file: "model.xml".to_string(),
            backup_dir: PathBuf::from("backups"),
        }
    }
}

impl StoreConfig {
    /// Defaults rooted at `home`.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            ..Self::default()
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No store configuration, using defaults");
                return Ok(Self::default());
            }
            Err(error) => return Err(PersistenceError::io("read", path, error)),
        };
        toml::from_str(&content).map_err(|error| PersistenceError::Config {
            path: path.to_path_buf(),
            reason: error.message().to_string(),
        })
    }

    /// Write as pretty TOML, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| PersistenceError::io("create directory", parent, e))?;
        }
        let content = toml::to_string_pretty(self).map_err(|error| PersistenceError::Config {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| PersistenceError::io("write", path, e))
    }

    pub fn data_path(&self) -> PathBuf {
        self.home.join(&self.data_dir)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_path().join(&self.snapshot_file)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.data_path().join(&self.backup_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::load_from(&dir.path().join("store.toml")).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.snapshot_path(), Path::new("./data/model.xml"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.toml");
        std::fs::write(&path, "home = \"/srv/plant\"\nbackup_dir = \"history\"\n").unwrap();
        let config = StoreConfig::load_from(&path).unwrap();
        assert_eq!(config.backup_path(), Path::new("/srv/plant/data/history"));
        assert_eq!(config.snapshot_file, "model.xml");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.toml");
        std::fs::write(&path, "home = [").unwrap();
        assert!(matches!(
            StoreConfig::load_from(&path),
            Err(PersistenceError::Config { .. })
        ));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf/store.toml");
        let config = StoreConfig::with_home("/opt/plant");
        config.save_to(&path).unwrap();
        assert_eq!(StoreConfig::load_from(&path).unwrap(), config);
    }
}
