//! In-memory plant model for a fleet-control kernel.
//!
//! A [`PlantModel`] is the pool of live entities: points, paths, vehicles,
//! location types, locations, blocks, groups and visual layouts. Each kind
//! lives in its own name-indexed arena, and entities refer to each other
//! through typed ids instead of names.
//!
//! # Example
//!
//! ```
//! use plant_model::{Path, PlantModel, Point, Triple};
//!
//! let mut model = PlantModel::new("Plant1");
//! let p1 = model.insert(Point::new("P1")).unwrap();
//! let mut p2 = Point::new("P2");
//! p2.set_position(Triple::new(1000, 0, 0));
//! let p2 = model.insert(p2).unwrap();
//! let path = model.insert(Path::new("P1-P2", p1, p2, 1000).unwrap()).unwrap();
//!
//! let destination = model.get(path).unwrap().destination_point();
//! assert_eq!(model.get(destination).unwrap().position().x, 1000);
//! ```

pub mod bounds;
pub mod entity;
mod error;
mod geometry;
mod model;
mod pool;

pub use bounds::ValidationError;
pub use entity::{
    Block, DEFAULT_PATH_VELOCITY, DEFAULT_ROUTING_COST, DEFAULT_SCALE, EnergyLevels, Entity, Group,
    Link, Location, LocationType, ModelLayoutElement, Path, Point, Properties, ShapeLayoutElement,
    Vehicle, VisualLayout, apply_property,
};
pub use error::{ModelError, Result};
pub use geometry::{PointType, Triple};
pub use model::{
    BlockId, EntityKind, GroupId, LocationId, LocationTypeId, ModelSummary, ObjectRef, PathId,
    PlantModel, PointId, ResourceRef, VehicleId, VisualLayoutId,
};
pub use pool::{Id, Pool};
