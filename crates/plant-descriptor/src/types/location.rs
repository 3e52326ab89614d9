use std::collections::BTreeSet;

use plant_model::{Properties, Triple, ValidationError, bounds};

use super::{builder_properties, named_descriptor};

type Result<T> = std::result::Result<T, ValidationError>;

/// A location type and its allowed operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationTypeDescriptor {
    name: String,
    allowed_operations: BTreeSet<String>,
    properties: Properties,
}

named_descriptor!(LocationTypeDescriptor, "location type");

impl LocationTypeDescriptor {
    pub fn builder(name: impl Into<String>) -> LocationTypeDescriptorBuilder {
        LocationTypeDescriptorBuilder {
            name: name.into(),
            allowed_operations: BTreeSet::new(),
            properties: Properties::new(),
        }
    }

    pub fn allowed_operations(&self) -> &BTreeSet<String> {
        &self.allowed_operations
    }

    #[must_use]
    pub fn with_allowed_operations<I, S>(&self, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_operations: operations.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }
}

/// Builder for [`LocationTypeDescriptor`].
#[derive(Debug, Clone)]
pub struct LocationTypeDescriptorBuilder {
    name: String,
    allowed_operations: BTreeSet<String>,
    properties: Properties,
}

builder_properties!(LocationTypeDescriptorBuilder);

impl LocationTypeDescriptorBuilder {
    #[must_use]
    pub fn allowed_operation(mut self, operation: impl Into<String>) -> Self {
        self.allowed_operations.insert(operation.into());
        self
    }

    pub fn build(self) -> Result<LocationTypeDescriptor> {
        bounds::name("location type", &self.name)?;
        Ok(LocationTypeDescriptor {
            name: self.name,
            allowed_operations: self.allowed_operations,
            properties: self.properties,
        })
    }
}

/// A link from a location to a point, with the operations allowed over it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LinkDescriptor {
    pub point: String,
    pub allowed_operations: BTreeSet<String>,
}

impl LinkDescriptor {
    pub fn new(point: impl Into<String>) -> Self {
        Self {
            point: point.into(),
            allowed_operations: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_operations<I, S>(mut self, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_operations = operations.into_iter().map(Into::into).collect();
        self
    }
}

/// A location, referencing its type and linked points by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDescriptor {
    name: String,
    position: Triple,
    location_type: String,
    links: Vec<LinkDescriptor>,
    properties: Properties,
}

named_descriptor!(LocationDescriptor, "location");

impl LocationDescriptor {
    pub fn builder(
        name: impl Into<String>,
        location_type: impl Into<String>,
    ) -> LocationDescriptorBuilder {
        LocationDescriptorBuilder {
            name: name.into(),
            position: Triple::default(),
            location_type: location_type.into(),
            links: Vec::new(),
            properties: Properties::new(),
        }
    }

    pub fn position(&self) -> Triple {
        self.position
    }

    pub fn location_type(&self) -> &str {
        &self.location_type
    }

    pub fn links(&self) -> &[LinkDescriptor] {
        &self.links
    }

    #[must_use]
    pub fn with_position(&self, position: Triple) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    pub fn with_location_type(&self, name: impl Into<String>) -> Result<Self> {
        let location_type = name.into();
        bounds::name("location type", &location_type)?;
        Ok(Self {
            location_type,
            ..self.clone()
        })
    }

    pub fn with_links(&self, links: Vec<LinkDescriptor>) -> Result<Self> {
        validate_links(&links)?;
        Ok(Self {
            links,
            ..self.clone()
        })
    }
}

/// Builder for [`LocationDescriptor`].
#[derive(Debug, Clone)]
pub struct LocationDescriptorBuilder {
    name: String,
    position: Triple,
    location_type: String,
    links: Vec<LinkDescriptor>,
    properties: Properties,
}

builder_properties!(LocationDescriptorBuilder);

impl LocationDescriptorBuilder {
    #[must_use]
    pub fn position(mut self, position: Triple) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn link(mut self, link: LinkDescriptor) -> Self {
        self.links.push(link);
        self
    }

    pub fn build(self) -> Result<LocationDescriptor> {
        bounds::name("location", &self.name)?;
        bounds::name("location type", &self.location_type)?;
        validate_links(&self.links)?;
        Ok(LocationDescriptor {
            name: self.name,
            position: self.position,
            location_type: self.location_type,
            links: self.links,
            properties: self.properties,
        })
    }
}

fn validate_links(links: &[LinkDescriptor]) -> Result<()> {
    links
        .iter()
        .try_for_each(|link| bounds::name("point", &link.point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_requires_type_name() {
        assert!(LocationDescriptor::builder("L1", "").build().is_err());
    }

    #[test]
    fn links_keep_operations() {
        let location = LocationDescriptor::builder("L1", "LType-1")
            .link(LinkDescriptor::new("P1").with_operations(["Load", "Unload"]))
            .build()
            .unwrap();
        assert_eq!(location.links()[0].allowed_operations.len(), 2);
        assert!(location.with_links(vec![LinkDescriptor::new("")]).is_err());
    }
}
