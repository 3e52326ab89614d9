//! The plant model container.

use std::fmt;

use crate::bounds::{self, ValidationError};
use crate::entity::{
    Block, Entity, Group, Location, LocationType, ModelLayoutElement, Path, Point, Properties,
    Sealed, Vehicle, VisualLayout, apply_property,
};
use crate::error::{ModelError, Result};
use crate::pool::{Id, Pool};

pub type PointId = Id<Point>;
pub type PathId = Id<Path>;
pub type VehicleId = Id<Vehicle>;
pub type LocationTypeId = Id<LocationType>;
pub type LocationId = Id<Location>;
pub type BlockId = Id<Block>;
pub type GroupId = Id<Group>;
pub type VisualLayoutId = Id<VisualLayout>;

/// The kinds of named entities in a plant model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Point,
    Path,
    Vehicle,
    LocationType,
    Location,
    Block,
    Group,
    VisualLayout,
}

impl EntityKind {
    /// All kinds in reference-dependency order.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Point,
        EntityKind::Path,
        EntityKind::Vehicle,
        EntityKind::LocationType,
        EntityKind::Location,
        EntityKind::Block,
        EntityKind::Group,
        EntityKind::VisualLayout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Point => "point",
            EntityKind::Path => "path",
            EntityKind::Vehicle => "vehicle",
            EntityKind::LocationType => "location type",
            EntityKind::Location => "location",
            EntityKind::Block => "block",
            EntityKind::Group => "group",
            EntityKind::VisualLayout => "visual layout",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a named entity of any kind except visual layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectRef {
    Point(PointId),
    Path(PathId),
    Vehicle(VehicleId),
    LocationType(LocationTypeId),
    Location(LocationId),
    Block(BlockId),
    Group(GroupId),
}

impl ObjectRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            ObjectRef::Point(_) => EntityKind::Point,
            ObjectRef::Path(_) => EntityKind::Path,
            ObjectRef::Vehicle(_) => EntityKind::Vehicle,
            ObjectRef::LocationType(_) => EntityKind::LocationType,
            ObjectRef::Location(_) => EntityKind::Location,
            ObjectRef::Block(_) => EntityKind::Block,
            ObjectRef::Group(_) => EntityKind::Group,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ObjectRef::Point(id) => id.index(),
            ObjectRef::Path(id) => id.index(),
            ObjectRef::Vehicle(id) => id.index(),
            ObjectRef::LocationType(id) => id.index(),
            ObjectRef::Location(id) => id.index(),
            ObjectRef::Block(id) => id.index(),
            ObjectRef::Group(id) => id.index(),
        }
    }
}

/// Reference to a block member: a point or a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceRef {
    Point(PointId),
    Path(PathId),
}

impl ResourceRef {
    /// The resource behind `object`, if it is a point or a path.
    pub fn from_object(object: ObjectRef) -> Option<Self> {
        match object {
            ObjectRef::Point(id) => Some(ResourceRef::Point(id)),
            ObjectRef::Path(id) => Some(ResourceRef::Path(id)),
            _ => None,
        }
    }

    pub fn as_object(&self) -> ObjectRef {
        match *self {
            ResourceRef::Point(id) => ObjectRef::Point(id),
            ResourceRef::Path(id) => ObjectRef::Path(id),
        }
    }
}

/// Entity counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelSummary {
    pub points: usize,
    pub paths: usize,
    pub vehicles: usize,
    pub location_types: usize,
    pub locations: usize,
    pub blocks: usize,
    pub groups: usize,
    pub visual_layouts: usize,
}

impl ModelSummary {
    pub fn rows(&self) -> [(EntityKind, usize); 8] {
        [
            (EntityKind::Point, self.points),
            (EntityKind::Path, self.paths),
            (EntityKind::Vehicle, self.vehicles),
            (EntityKind::LocationType, self.location_types),
            (EntityKind::Location, self.locations),
            (EntityKind::Block, self.blocks),
            (EntityKind::Group, self.groups),
            (EntityKind::VisualLayout, self.visual_layouts),
        ]
    }

    pub fn total(&self) -> usize {
        self.rows().iter().map(|(_, count)| count).sum()
    }
}

/// The pool: every live entity of one plant model, addressable by id and name.
#[derive(Debug, Clone)]
pub struct PlantModel {
    name: String,
    properties: Properties,
    pub(crate) points: Pool<Point>,
    pub(crate) paths: Pool<Path>,
    pub(crate) vehicles: Pool<Vehicle>,
    pub(crate) location_types: Pool<LocationType>,
    pub(crate) locations: Pool<Location>,
    pub(crate) blocks: Pool<Block>,
    pub(crate) groups: Pool<Group>,
    pub(crate) visual_layouts: Pool<VisualLayout>,
}

impl Default for PlantModel {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

impl PlantModel {
    /// Name given to models that were never named, e.g. before the first save.
    pub const DEFAULT_NAME: &'static str = "unnamed";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Properties::new(),
            points: Pool::default(),
            paths: Pool::default(),
            vehicles: Pool::default(),
            location_types: Pool::default(),
            locations: Pool::default(),
            blocks: Pool::default(),
            groups: Pool::default(),
            visual_layouts: Pool::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> std::result::Result<(), ValidationError> {
        let name = name.into();
        bounds::name("model", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Option<String>) {
        apply_property(&mut self.properties, key, value);
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }

    /// Add an entity to its pool.
    ///
    /// Fails if the name is taken within the kind or if the entity holds an
    /// id that does not address an entity of this model.
    pub fn insert<T: Entity>(&mut self, entity: T) -> Result<Id<T>> {
        entity.check_references(self)?;
        T::pool_mut(self, Sealed(())).insert(entity)
    }

    pub fn get<T: Entity>(&self, id: Id<T>) -> Option<&T> {
        T::pool(self).get(id)
    }

    pub fn get_mut<T: Entity>(&mut self, id: Id<T>) -> Option<&mut T> {
        T::pool_mut(self, Sealed(())).get_mut(id)
    }

    pub fn contains<T: Entity>(&self, id: Id<T>) -> bool {
        T::pool(self).contains(id)
    }

    pub fn id_of<T: Entity>(&self, name: &str) -> Option<Id<T>> {
        T::pool(self).id_of(name)
    }

    pub fn by_name<T: Entity>(&self, name: &str) -> Option<&T> {
        let pool = T::pool(self);
        pool.id_of(name).and_then(|id| pool.get(id))
    }

    /// Entities of one kind, ordered by name.
    pub fn iter<T: Entity>(&self) -> impl Iterator<Item = (Id<T>, &T)> + '_ {
        T::pool(self).iter()
    }

    pub fn count<T: Entity>(&self) -> usize {
        T::pool(self).len()
    }

    /// Rename an entity. References held by id follow the new name.
    pub fn rename<T: Entity>(&mut self, id: Id<T>, new_name: impl Into<String>) -> Result<()> {
        T::pool_mut(self, Sealed(())).rename(id, new_name.into())
    }

    /// Current name of a referenced entity.
    pub fn object_name(&self, object: ObjectRef) -> Option<&str> {
        match object {
            ObjectRef::Point(id) => self.get(id).map(Entity::name),
            ObjectRef::Path(id) => self.get(id).map(Entity::name),
            ObjectRef::Vehicle(id) => self.get(id).map(Entity::name),
            ObjectRef::LocationType(id) => self.get(id).map(Entity::name),
            ObjectRef::Location(id) => self.get(id).map(Entity::name),
            ObjectRef::Block(id) => self.get(id).map(Entity::name),
            ObjectRef::Group(id) => self.get(id).map(Entity::name),
        }
    }

    /// Find an entity by name, searching kinds in dependency order.
    pub fn find_object(&self, name: &str) -> Option<ObjectRef> {
        EntityKind::ALL
            .iter()
            .find_map(|&kind| self.find_object_of(kind, name))
    }

    /// Find an entity of one kind by name. Visual layouts are never objects.
    pub fn find_object_of(&self, kind: EntityKind, name: &str) -> Option<ObjectRef> {
        match kind {
            EntityKind::Point => self.points.id_of(name).map(ObjectRef::Point),
            EntityKind::Path => self.paths.id_of(name).map(ObjectRef::Path),
            EntityKind::Vehicle => self.vehicles.id_of(name).map(ObjectRef::Vehicle),
            EntityKind::LocationType => self.location_types.id_of(name).map(ObjectRef::LocationType),
            EntityKind::Location => self.locations.id_of(name).map(ObjectRef::Location),
            EntityKind::Block => self.blocks.id_of(name).map(ObjectRef::Block),
            EntityKind::Group => self.groups.id_of(name).map(ObjectRef::Group),
            EntityKind::VisualLayout => None,
        }
    }

    pub fn add_block_member(&mut self, block: BlockId, member: ResourceRef) -> Result<bool> {
        self.ensure_object(member.as_object())?;
        let block = self.blocks.get_mut(block).ok_or(ModelError::UnknownId {
            kind: EntityKind::Block,
            index: block.index(),
        })?;
        Ok(block.add_member(member))
    }

    pub fn add_group_member(&mut self, group: GroupId, member: ObjectRef) -> Result<bool> {
        self.ensure_object(member)?;
        let group = self.groups.get_mut(group).ok_or(ModelError::UnknownId {
            kind: EntityKind::Group,
            index: group.index(),
        })?;
        Ok(group.add_member(member))
    }

    pub fn add_model_layout_element(
        &mut self,
        layout: VisualLayoutId,
        element: ModelLayoutElement,
    ) -> Result<()> {
        self.ensure_object(element.visualized_object)?;
        let layout = self
            .visual_layouts
            .get_mut(layout)
            .ok_or(ModelError::UnknownId {
                kind: EntityKind::VisualLayout,
                index: layout.index(),
            })?;
        layout.add_model_element(element)
    }

    /// Remove every entity, the properties, and reset the name.
    pub fn clear(&mut self) {
        self.name = Self::DEFAULT_NAME.to_string();
        self.properties.clear();
        self.points.clear();
        self.paths.clear();
        self.vehicles.clear();
        self.location_types.clear();
        self.locations.clear();
        self.blocks.clear();
        self.groups.clear();
        self.visual_layouts.clear();
    }

    /// True if the model holds no entities.
    pub fn is_empty(&self) -> bool {
        self.summary().total() == 0
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            points: self.points.len(),
            paths: self.paths.len(),
            vehicles: self.vehicles.len(),
            location_types: self.location_types.len(),
            locations: self.locations.len(),
            blocks: self.blocks.len(),
            groups: self.groups.len(),
            visual_layouts: self.visual_layouts.len(),
        }
    }

    fn ensure_object(&self, object: ObjectRef) -> Result<()> {
        if self.object_name(object).is_none() {
            return Err(ModelError::UnknownId {
                kind: object.kind(),
                index: object.index(),
            });
        }
        Ok(())
    }
}
