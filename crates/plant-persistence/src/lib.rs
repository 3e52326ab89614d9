//! Persistence for plant models.
//!
//! Saving runs the live model through the [`builder`] into a descriptor
//! tree, encodes it with a [`TreeCodec`](plant_descriptor::TreeCodec) and
//! hands the bytes to the [`DurableStore`], which backs up the previous
//! snapshot before writing. Loading runs the same chain backwards.
//!
//! # Example
//!
//! ```no_run
//! use plant_model::{PlantModel, Point};
//! use plant_persistence::DurableStore;
//!
//! let store = DurableStore::new("/var/lib/plant");
//! let mut model = PlantModel::new("Plant1");
//! model.insert(Point::new("P1"))?;
//! store.save_model(&model)?;
//!
//! let loaded = store.read_model()?;
//! assert_eq!(loaded.name(), "Plant1");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! - `builder/` - model to descriptor tree and back, with reference resolution
//! - `store.rs` - snapshot file, backups, digests
//! - `io/` - atomic and replace-writes, hashing, JSON state files
//! - `clock.rs` - injected UTC clock for backup names
//! - `config.rs` - TOML store configuration
//! - `error.rs` - error types with user-friendly messages

pub mod builder;
mod clock;
mod config;
mod error;
mod io;
mod store;

pub use builder::{Diagnostic, LoadReport, build_model, deserialize, serialize};
pub use clock::{BACKUP_TIMESTAMP_FORMAT, Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use error::{PersistenceError, Result};
pub use io::{JsonStateFile, compute_file_hash, hash_bytes, replace_file, write_atomic};
pub use store::{BackupEntry, DurableStore};
