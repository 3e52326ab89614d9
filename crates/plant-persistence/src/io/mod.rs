//! File I/O primitives used by the store.
//!
//! - Atomic snapshot writes (temp file + rename)
//! - Replace-writes for frequently rewritten state files
//! - SHA-256 digests for comparing snapshots with backups

mod hash;
mod state;
mod write;

pub use hash::{compute_file_hash, hash_bytes};
pub use state::JsonStateFile;
pub use write::{replace_file, write_atomic};
