use std::collections::BTreeSet;

use plant_model::{Properties, ValidationError, bounds};

use super::{ObjectName, builder_properties, named_descriptor};

type Result<T> = std::result::Result<T, ValidationError>;

/// A group of arbitrary entities, referenced by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDescriptor {
    name: String,
    members: BTreeSet<ObjectName>,
    properties: Properties,
}

named_descriptor!(GroupDescriptor, "group");

impl GroupDescriptor {
    pub fn builder(name: impl Into<String>) -> GroupDescriptorBuilder {
        GroupDescriptorBuilder {
            name: name.into(),
            members: BTreeSet::new(),
            properties: Properties::new(),
        }
    }

    pub fn members(&self) -> &BTreeSet<ObjectName> {
        &self.members
    }

    #[must_use]
    pub fn with_members<I, S>(&self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ObjectName>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }
}

/// Builder for [`GroupDescriptor`].
#[derive(Debug, Clone)]
pub struct GroupDescriptorBuilder {
    name: String,
    members: BTreeSet<ObjectName>,
    properties: Properties,
}

builder_properties!(GroupDescriptorBuilder);

impl GroupDescriptorBuilder {
    #[must_use]
    pub fn member(mut self, member: impl Into<ObjectName>) -> Self {
        self.members.insert(member.into());
        self
    }

    pub fn build(self) -> Result<GroupDescriptor> {
        bounds::name("group", &self.name)?;
        Ok(GroupDescriptor {
            name: self.name,
            members: self.members,
            properties: self.properties,
        })
    }
}
