use plant_model::Properties;

use super::{
    BlockDescriptor, GroupDescriptor, LocationDescriptor, LocationTypeDescriptor, PathDescriptor,
    PointDescriptor, VehicleDescriptor, VisualLayoutDescriptor,
};

/// Document schema version written by this crate and accepted on load.
pub const MODEL_VERSION: &str = "0.0.2";

/// Root of the descriptor tree: one complete plant model.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantModelDescriptor {
    /// Version tag of the document this tree was read from or is written as.
    pub version: String,
    pub name: String,
    pub properties: Properties,
    pub points: Vec<PointDescriptor>,
    pub paths: Vec<PathDescriptor>,
    pub vehicles: Vec<VehicleDescriptor>,
    pub location_types: Vec<LocationTypeDescriptor>,
    pub locations: Vec<LocationDescriptor>,
    pub blocks: Vec<BlockDescriptor>,
    pub groups: Vec<GroupDescriptor>,
    pub visual_layouts: Vec<VisualLayoutDescriptor>,
}

impl PlantModelDescriptor {
    /// An empty tree tagged with [`MODEL_VERSION`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: MODEL_VERSION.to_string(),
            name: name.into(),
            properties: Properties::new(),
            points: Vec::new(),
            paths: Vec::new(),
            vehicles: Vec::new(),
            location_types: Vec::new(),
            locations: Vec::new(),
            blocks: Vec::new(),
            groups: Vec::new(),
            visual_layouts: Vec::new(),
        }
    }

    /// Total number of named entities in the tree.
    pub fn entity_count(&self) -> usize {
        self.points.len()
            + self.paths.len()
            + self.vehicles.len()
            + self.location_types.len()
            + self.locations.len()
            + self.blocks.len()
            + self.groups.len()
            + self.visual_layouts.len()
    }
}
