use std::collections::BTreeSet;

use crate::entity::{Entity, Properties, apply_property, entity_basics};
use crate::error::{ModelError, Result};
use crate::model::{EntityKind, PlantModel, ResourceRef};

/// A set of points and paths that is allocated as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    name: String,
    members: BTreeSet<ResourceRef>,
    properties: Properties,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeSet::new(),
            properties: Properties::new(),
        }
    }

    pub fn members(&self) -> &BTreeSet<ResourceRef> {
        &self.members
    }

    pub fn contains(&self, member: ResourceRef) -> bool {
        self.members.contains(&member)
    }

    pub fn add_member(&mut self, member: ResourceRef) -> bool {
        self.members.insert(member)
    }

    pub fn remove_member(&mut self, member: ResourceRef) -> bool {
        self.members.remove(&member)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Option<String>) {
        apply_property(&mut self.properties, key, value);
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }
}

impl Entity for Block {
    entity_basics!(Block, EntityKind::Block, blocks);

    fn check_references(&self, model: &PlantModel) -> Result<()> {
        for member in &self.members {
            let object = member.as_object();
            if model.object_name(object).is_none() {
                return Err(ModelError::UnknownId {
                    kind: object.kind(),
                    index: object.index(),
                });
            }
        }
        Ok(())
    }
}
