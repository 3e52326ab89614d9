use crate::bounds::{self, MIN_PATH_LENGTH, ValidationError};
use crate::entity::{Entity, Point, Properties, apply_property, entity_basics};
use crate::error::{ModelError, Result};
use crate::model::{EntityKind, PlantModel};
use crate::pool::Id;

/// Default routing cost of a new path.
pub const DEFAULT_ROUTING_COST: i64 = 1;

/// Default forward and reverse velocity limit of a new path, in mm/s.
pub const DEFAULT_PATH_VELOCITY: i32 = 1000;

/// A directed connection between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    name: String,
    source_point: Id<Point>,
    destination_point: Id<Point>,
    length: i64,
    routing_cost: i64,
    max_velocity: i32,
    max_reverse_velocity: i32,
    locked: bool,
    properties: Properties,
}

impl Path {
    pub fn new(
        name: impl Into<String>,
        source_point: Id<Point>,
        destination_point: Id<Point>,
        length: i64,
    ) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            name: name.into(),
            source_point,
            destination_point,
            length: bounds::length("length", length, MIN_PATH_LENGTH)?,
            routing_cost: DEFAULT_ROUTING_COST,
            max_velocity: DEFAULT_PATH_VELOCITY,
            max_reverse_velocity: DEFAULT_PATH_VELOCITY,
            locked: false,
            properties: Properties::new(),
        })
    }

    pub fn source_point(&self) -> Id<Point> {
        self.source_point
    }

    pub fn destination_point(&self) -> Id<Point> {
        self.destination_point
    }

    /// Length in millimetres.
    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn routing_cost(&self) -> i64 {
        self.routing_cost
    }

    pub fn max_velocity(&self) -> i32 {
        self.max_velocity
    }

    pub fn max_reverse_velocity(&self) -> i32 {
        self.max_reverse_velocity
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// True if a vehicle may travel from source to destination.
    pub fn is_navigable_forward(&self) -> bool {
        !self.locked && self.max_velocity > 0
    }

    /// True if a vehicle may travel from destination to source.
    pub fn is_navigable_reverse(&self) -> bool {
        !self.locked && self.max_reverse_velocity > 0
    }

    pub fn set_length(&mut self, length: i64) -> std::result::Result<(), ValidationError> {
        self.length = bounds::length("length", length, MIN_PATH_LENGTH)?;
        Ok(())
    }

    pub fn set_routing_cost(&mut self, routing_cost: i64) {
        self.routing_cost = routing_cost;
    }

    pub fn set_max_velocity(&mut self, velocity: i32) -> std::result::Result<(), ValidationError> {
        self.max_velocity = bounds::velocity("maxVelocity", velocity)?;
        Ok(())
    }

    pub fn set_max_reverse_velocity(
        &mut self,
        velocity: i32,
    ) -> std::result::Result<(), ValidationError> {
        self.max_reverse_velocity = bounds::velocity("maxReverseVelocity", velocity)?;
        Ok(())
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Option<String>) {
        apply_property(&mut self.properties, key, value);
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }
}

impl Entity for Path {
    entity_basics!(Path, EntityKind::Path, paths);

    fn check_references(&self, model: &PlantModel) -> Result<()> {
        for point in [self.source_point, self.destination_point] {
            if !model.contains(point) {
                return Err(ModelError::UnknownId {
                    kind: EntityKind::Point,
                    index: point.index(),
                });
            }
        }
        Ok(())
    }
}
