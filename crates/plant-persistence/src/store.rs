//! The durable store: one current snapshot file plus a backup history.
//!
//! ```text
//! <home>/data/model.xml
//! <home>/data/backups/model.xml_backup_20240131-235959-123
//! ```
//!
//! Every save or remove that would overwrite or delete an existing snapshot
//! first copies it into the backup directory. Backups are never pruned.

use std::fs;
use std::path::{Path, PathBuf};

use plant_descriptor::{PlantModelDescriptor, TreeCodec};
use plant_model::PlantModel;
use plant_xml::XmlCodec;
use tracing::{debug, info};

use crate::builder::{self, LoadReport};
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::{PersistenceError, Result};
use crate::io::{compute_file_hash, hash_bytes, write_atomic};

/// One file in the backup directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub path: PathBuf,
    /// UTC timestamp from the file name.
    pub timestamp: String,
    /// Collision counter; 0 for the first backup of a timestamp.
    pub sequence: u32,
    pub size: u64,
    /// Hex-encoded SHA-256 of the file content.
    pub digest: String,
}

/// Snapshot store over a [`TreeCodec`], with an injected [`Clock`] for
/// backup names.
///
/// Calls are not synchronized; at most one writer may use a snapshot path at
/// a time.
#[derive(Debug, Clone)]
pub struct DurableStore<C = XmlCodec, K = SystemClock> {
    data_dir: PathBuf,
    snapshot_path: PathBuf,
    backup_dir: PathBuf,
    codec: C,
    clock: K,
}

impl DurableStore {
    /// A store with the default layout under `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self::from_config(&StoreConfig::with_home(home))
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            data_dir: config.data_path(),
            snapshot_path: config.snapshot_path(),
            backup_dir: config.backup_path(),
            codec: XmlCodec::new(),
            clock: SystemClock,
        }
    }
}

impl<C: TreeCodec, K: Clock> DurableStore<C, K> {
    pub fn with_codec<D: TreeCodec>(self, codec: D) -> DurableStore<D, K> {
        DurableStore {
            data_dir: self.data_dir,
            snapshot_path: self.snapshot_path,
            backup_dir: self.backup_dir,
            codec,
            clock: self.clock,
        }
    }

    pub fn with_clock<L: Clock>(self, clock: L) -> DurableStore<C, L> {
        DurableStore {
            data_dir: self.data_dir,
            snapshot_path: self.snapshot_path,
            backup_dir: self.backup_dir,
            codec: self.codec,
            clock,
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// True if a snapshot file exists.
    pub fn has_saved_model(&self) -> bool {
        self.snapshot_path.is_file()
    }

    /// Back up the current snapshot, if any, then write `model` as the new one.
    pub fn save_model(&self, model: &PlantModel) -> Result<()> {
        // Encode first so a model that cannot be written leaves no backup behind.
        let bytes = self.encode(model, &self.snapshot_path)?;
        ensure_directory(&self.data_dir)?;
        self.backup_snapshot()?;
        write_atomic(&self.snapshot_path, &bytes)?;
        info!(
            path = %self.snapshot_path.display(),
            model = %model.name(),
            entities = model.summary().total(),
            digest = %hash_bytes(&bytes),
            "Saved plant model"
        );
        Ok(())
    }

    /// Read the snapshot into a new model. Without a snapshot the result is
    /// an empty model named [`PlantModel::DEFAULT_NAME`].
    pub fn read_model(&self) -> Result<PlantModel> {
        self.read_model_with_report().map(|(model, _)| model)
    }

    pub fn read_model_with_report(&self) -> Result<(PlantModel, LoadReport)> {
        if !self.has_saved_model() {
            debug!(path = %self.snapshot_path.display(), "No saved model");
            return Ok((PlantModel::default(), LoadReport::default()));
        }
        let tree = self.read_document(&self.snapshot_path)?;
        let (model, report) = builder::build_model(&tree)?;
        info!(
            path = %self.snapshot_path.display(),
            model = %model.name(),
            entities = report.summary.total(),
            "Loaded plant model"
        );
        Ok((model, report))
    }

    /// Load the snapshot into `target`.
    ///
    /// Unreadable documents and version mismatches leave `target` as it was;
    /// any later failure leaves it cleared.
    pub fn load_into(&self, target: &mut PlantModel) -> Result<LoadReport> {
        if !self.has_saved_model() {
            target.clear();
            return Ok(LoadReport::default());
        }
        let tree = self.read_document(&self.snapshot_path)?;
        let report = builder::deserialize(&tree, target)?;
        info!(
            path = %self.snapshot_path.display(),
            model = %target.name(),
            entities = report.summary.total(),
            "Loaded plant model"
        );
        Ok(report)
    }

    /// Back up and delete the snapshot. A no-op without a snapshot.
    pub fn remove_model(&self) -> Result<()> {
        if !self.has_saved_model() {
            return Ok(());
        }
        self.backup_snapshot()?;
        fs::remove_file(&self.snapshot_path)
            .map_err(|e| PersistenceError::io("delete", self.snapshot_path.clone(), e))?;
        info!(path = %self.snapshot_path.display(), "Removed plant model");
        Ok(())
    }

    /// Backups of this snapshot, oldest first.
    pub fn list_backups(&self) -> Result<Vec<BackupEntry>> {
        let entries = match fs::read_dir(&self.backup_dir) {
            Ok(entries) => entries,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(PersistenceError::io("read", self.backup_dir.clone(), error)),
        };

        let prefix = self.backup_prefix();
        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PersistenceError::io("read", self.backup_dir.clone(), e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(stamp) = file_name.strip_prefix(prefix.as_str()) else {
                continue;
            };
            let (timestamp, sequence) = match stamp.split_once('.') {
                Some((timestamp, counter)) => match counter.parse() {
                    Ok(sequence) => (timestamp.to_string(), sequence),
                    Err(_) => continue,
                },
                None => (stamp.to_string(), 0),
            };
            let size = entry
                .metadata()
                .map_err(|e| PersistenceError::io("read", path.clone(), e))?
                .len();
            let digest = compute_file_hash(&path)?;
            backups.push(BackupEntry {
                path,
                timestamp,
                sequence,
                size,
                digest,
            });
        }
        backups.sort_by(|a, b| (&a.timestamp, a.sequence).cmp(&(&b.timestamp, b.sequence)));
        Ok(backups)
    }

    /// SHA-256 of the current snapshot, if one exists.
    pub fn snapshot_digest(&self) -> Result<Option<String>> {
        if !self.has_saved_model() {
            return Ok(None);
        }
        compute_file_hash(&self.snapshot_path).map(Some)
    }

    /// Decode any document file with this store's codec.
    pub fn read_document(&self, path: &Path) -> Result<PlantModelDescriptor> {
        let bytes = fs::read(path).map_err(|e| PersistenceError::io("read", path, e))?;
        self.codec
            .decode(&bytes)
            .map_err(|source| PersistenceError::Codec {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Encode `model` into a file outside the store, without backups.
    pub fn write_document(&self, model: &PlantModel, path: &Path) -> Result<()> {
        let bytes = self.encode(model, path)?;
        write_atomic(path, &bytes)?;
        info!(path = %path.display(), model = %model.name(), "Exported plant model");
        Ok(())
    }

    fn encode(&self, model: &PlantModel, path: &Path) -> Result<Vec<u8>> {
        let tree = builder::serialize(model)?;
        self.codec
            .encode(&tree)
            .map_err(|source| PersistenceError::Codec {
                path: path.to_path_buf(),
                source,
            })
    }

    fn backup_prefix(&self) -> String {
        let snapshot = self
            .snapshot_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{snapshot}_backup_")
    }

    /// Copy the snapshot into the backup directory under a name no earlier
    /// backup uses.
    fn backup_snapshot(&self) -> Result<Option<PathBuf>> {
        if !self.has_saved_model() {
            return Ok(None);
        }
        ensure_directory(&self.backup_dir)?;

        let base = format!("{}{}", self.backup_prefix(), self.clock.backup_timestamp());
        let mut target = self.backup_dir.join(&base);
        let mut sequence = 0u32;
        while target.exists() {
            sequence += 1;
            target = self.backup_dir.join(format!("{base}.{sequence}"));
        }

        fs::copy(&self.snapshot_path, &target)
            .map_err(|e| PersistenceError::io("copy", target.clone(), e))?;
        debug!(
            from = %self.snapshot_path.display(),
            to = %target.display(),
            "Backed up snapshot"
        );
        Ok(Some(target))
    }
}

/// Create `path` and its parents unless it already is a directory.
fn ensure_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(PersistenceError::DataDirectory {
            path: path.to_path_buf(),
            reason: "exists and is not a directory".to_string(),
        });
    }
    fs::create_dir_all(path).map_err(|error| PersistenceError::DataDirectory {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn fixed_store(home: &Path) -> DurableStore<XmlCodec, FixedClock> {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        DurableStore::new(home).with_clock(FixedClock(instant))
    }

    #[test]
    fn colliding_backups_get_a_counter() {
        let dir = tempdir().unwrap();
        let store = fixed_store(dir.path());
        let model = PlantModel::new("Plant1");
        for _ in 0..3 {
            store.save_model(&model).unwrap();
        }
        let backups = store.list_backups().unwrap();
        let names: Vec<_> = backups
            .iter()
            .map(|b| b.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "model.xml_backup_20240501-120000-000",
                "model.xml_backup_20240501-120000-000.1",
            ]
        );
        assert_eq!(backups[1].sequence, 1);
    }

    #[test]
    fn data_path_occupied_by_file_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("data"), "not a directory").unwrap();
        let store = fixed_store(dir.path());
        let error = store.save_model(&PlantModel::new("Plant1")).unwrap_err();
        assert!(matches!(error, PersistenceError::DataDirectory { .. }));
        assert!(!error.is_structural());
    }

    #[test]
    fn unrelated_files_are_not_backups() {
        let dir = tempdir().unwrap();
        let store = fixed_store(dir.path());
        fs::create_dir_all(store.backup_dir()).unwrap();
        fs::write(store.backup_dir().join("notes.txt"), "x").unwrap();
        assert!(store.list_backups().unwrap().is_empty());
    }
}
