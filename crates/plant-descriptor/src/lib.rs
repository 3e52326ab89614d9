//! Entity descriptors for plant model persistence.
//!
//! Descriptors are flat value objects, one per entity kind, that reference
//! related entities only by name. They are created through explicit builders
//! and changed only by copy-returning `with_*` methods, each of which applies
//! the same field bounds as the live model.
//!
//! The [`TreeCodec`] trait is the boundary to the document format: the rest
//! of the system only ever hands a [`PlantModelDescriptor`] to `encode` and
//! receives one back from `decode`.
//!
//! # Example
//!
//! ```
//! use plant_descriptor::{PathDescriptor, PointDescriptor};
//!
//! let p1 = PointDescriptor::new("P1").unwrap();
//! let path = PathDescriptor::builder("P1-P2", "P1", "P2")
//!     .length(1000)
//!     .max_velocity(1000)
//!     .build()
//!     .unwrap();
//! assert_eq!(path.source_point(), p1.name());
//! assert!(path.with_max_velocity(-1).is_err());
//! ```

mod codec;
mod error;
mod types;

pub use codec::TreeCodec;
pub use error::{CodecError, Result};
pub use types::{
    BlockDescriptor, BlockDescriptorBuilder, GroupDescriptor, GroupDescriptorBuilder,
    LinkDescriptor, LocationDescriptor, LocationDescriptorBuilder, LocationTypeDescriptor,
    LocationTypeDescriptorBuilder, MODEL_VERSION, ModelLayoutElementDescriptor, ObjectName,
    PathDescriptor, PathDescriptorBuilder, PlantModelDescriptor, PointDescriptor,
    PointDescriptorBuilder, ShapeLayoutElementDescriptor, VehicleDescriptor,
    VehicleDescriptorBuilder, VisualLayoutDescriptor, VisualLayoutDescriptorBuilder,
};
