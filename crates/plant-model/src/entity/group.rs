use std::collections::BTreeSet;

use crate::entity::{Entity, Properties, apply_property, entity_basics};
use crate::error::{ModelError, Result};
use crate::model::{EntityKind, ObjectRef, PlantModel};

/// An arbitrary, named collection of model entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    name: String,
    members: BTreeSet<ObjectRef>,
    properties: Properties,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeSet::new(),
            properties: Properties::new(),
        }
    }

    pub fn members(&self) -> &BTreeSet<ObjectRef> {
        &self.members
    }

    pub fn add_member(&mut self, member: ObjectRef) -> bool {
        self.members.insert(member)
    }

    pub fn remove_member(&mut self, member: ObjectRef) -> bool {
        self.members.remove(&member)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Option<String>) {
        apply_property(&mut self.properties, key, value);
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }
}

impl Entity for Group {
    entity_basics!(Group, EntityKind::Group, groups);

    fn check_references(&self, model: &PlantModel) -> Result<()> {
        for &member in &self.members {
            if model.object_name(member).is_none() {
                return Err(ModelError::UnknownId {
                    kind: member.kind(),
                    index: member.index(),
                });
            }
        }
        Ok(())
    }
}
