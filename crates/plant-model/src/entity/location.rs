use std::collections::BTreeSet;

use crate::entity::{Entity, Point, Properties, apply_property, entity_basics};
use crate::error::{ModelError, Result};
use crate::geometry::Triple;
use crate::model::{EntityKind, PlantModel};
use crate::pool::Id;

/// A category of locations and the operations vehicles may perform there.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationType {
    name: String,
    allowed_operations: BTreeSet<String>,
    properties: Properties,
}

impl LocationType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allowed_operations: BTreeSet::new(),
            properties: Properties::new(),
        }
    }

    pub fn allowed_operations(&self) -> &BTreeSet<String> {
        &self.allowed_operations
    }

    pub fn is_allowed(&self, operation: &str) -> bool {
        self.allowed_operations.contains(operation)
    }

    pub fn set_allowed_operations(&mut self, operations: BTreeSet<String>) {
        self.allowed_operations = operations;
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Option<String>) {
        apply_property(&mut self.properties, key, value);
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }
}

impl Entity for LocationType {
    entity_basics!(LocationType, EntityKind::LocationType, location_types);
}

/// Connection between a location and a point vehicles use to reach it.
///
/// An empty operation set means all operations of the location type apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub point: Id<Point>,
    pub allowed_operations: BTreeSet<String>,
}

impl Link {
    pub fn new(point: Id<Point>) -> Self {
        Self {
            point,
            allowed_operations: BTreeSet::new(),
        }
    }

    pub fn with_operations<I, S>(mut self, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_operations = operations.into_iter().map(Into::into).collect();
        self
    }
}

/// A load/unload station.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    name: String,
    position: Triple,
    location_type: Id<LocationType>,
    links: Vec<Link>,
    properties: Properties,
}

impl Location {
    pub fn new(name: impl Into<String>, location_type: Id<LocationType>) -> Self {
        Self {
            name: name.into(),
            position: Triple::default(),
            location_type,
            links: Vec::new(),
            properties: Properties::new(),
        }
    }

    pub fn position(&self) -> Triple {
        self.position
    }

    pub fn location_type(&self) -> Id<LocationType> {
        self.location_type
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link_to(&self, point: Id<Point>) -> Option<&Link> {
        self.links.iter().find(|link| link.point == point)
    }

    pub fn set_position(&mut self, position: Triple) {
        self.position = position;
    }

    /// Add a link, replacing an existing link to the same point.
    pub fn attach_link(&mut self, link: Link) {
        match self.links.iter_mut().find(|existing| existing.point == link.point) {
            Some(existing) => *existing = link,
            None => self.links.push(link),
        }
    }

    pub fn detach_link(&mut self, point: Id<Point>) -> Option<Link> {
        let position = self.links.iter().position(|link| link.point == point)?;
        Some(self.links.remove(position))
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Option<String>) {
        apply_property(&mut self.properties, key, value);
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }
}

impl Entity for Location {
    entity_basics!(Location, EntityKind::Location, locations);

    fn check_references(&self, model: &PlantModel) -> Result<()> {
        if !model.contains(self.location_type) {
            return Err(ModelError::UnknownId {
                kind: EntityKind::LocationType,
                index: self.location_type.index(),
            });
        }
        for link in &self.links {
            if !model.contains(link.point) {
                return Err(ModelError::UnknownId {
                    kind: EntityKind::Point,
                    index: link.point.index(),
                });
            }
        }
        Ok(())
    }
}
