//! Tree codec boundary.

use crate::error::Result;
use crate::types::PlantModelDescriptor;

/// Encodes a descriptor tree to bytes and back.
///
/// Implementations own the document format entirely. Decoding must not
/// interpret the version tag; version gating belongs to the caller.
pub trait TreeCodec {
    fn encode(&self, model: &PlantModelDescriptor) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<PlantModelDescriptor>;
}
