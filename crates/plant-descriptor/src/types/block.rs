use std::collections::BTreeSet;

use plant_model::{Properties, ValidationError, bounds};

use super::{ObjectName, builder_properties, named_descriptor};

type Result<T> = std::result::Result<T, ValidationError>;

/// A block of points and paths, referenced by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDescriptor {
    name: String,
    members: BTreeSet<ObjectName>,
    properties: Properties,
}

named_descriptor!(BlockDescriptor, "block");

impl BlockDescriptor {
    pub fn builder(name: impl Into<String>) -> BlockDescriptorBuilder {
        BlockDescriptorBuilder {
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

/// Builder for [`BlockDescriptor`].
#[derive(Debug, Clone)]
pub struct BlockDescriptorBuilder {
    name: String,
    members: BTreeSet<ObjectName>,
    properties: Properties,
}

builder_properties!(BlockDescriptorBuilder);

impl BlockDescriptorBuilder {
    #[must_use]
    pub fn member(mut self, member: impl Into<ObjectName>) -> Self {
        self.members.insert(member.into());
        self
    }

    pub fn build(self) -> Result<BlockDescriptor> {
        bounds::name("block", &self.name)?;
        Ok(BlockDescriptor {
            name: self.name,
            members: self.members,
            properties: self.properties,
        })
    }
}
