use plant_model::bounds::{self, MIN_PATH_LENGTH};
use plant_model::{DEFAULT_PATH_VELOCITY, DEFAULT_ROUTING_COST, Properties, ValidationError};

use super::{builder_properties, named_descriptor};

type Result<T> = std::result::Result<T, ValidationError>;

/// A directed connection between two points, referenced by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDescriptor {
    name: String,
    source_point: String,
    destination_point: String,
    length: i64,
    routing_cost: i64,
    max_velocity: i32,
    max_reverse_velocity: i32,
    locked: bool,
    properties: Properties,
}

named_descriptor!(PathDescriptor, "path");

impl PathDescriptor {
    pub fn builder(
        name: impl Into<String>,
        source_point: impl Into<String>,
        destination_point: impl Into<String>,
    ) -> PathDescriptorBuilder {
        PathDescriptorBuilder {
            name: name.into(),
            source_point: source_point.into(),
            destination_point: destination_point.into(),
            length: MIN_PATH_LENGTH,
            routing_cost: DEFAULT_ROUTING_COST,
            max_velocity: DEFAULT_PATH_VELOCITY,
            max_reverse_velocity: DEFAULT_PATH_VELOCITY,
            locked: false,
            properties: Properties::new(),
        }
    }

    pub fn source_point(&self) -> &str {
        &self.source_point
    }

    pub fn destination_point(&self) -> &str {
        &self.destination_point
    }

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

    pub fn with_source_point(&self, name: impl Into<String>) -> Result<Self> {
        let source_point = name.into();
        bounds::name("point", &source_point)?;
        Ok(Self {
            source_point,
            ..self.clone()
        })
    }

    pub fn with_destination_point(&self, name: impl Into<String>) -> Result<Self> {
        let destination_point = name.into();
        bounds::name("point", &destination_point)?;
        Ok(Self {
            destination_point,
            ..self.clone()
        })
    }

    pub fn with_length(&self, length: i64) -> Result<Self> {
        Ok(Self {
            length: bounds::length("length", length, MIN_PATH_LENGTH)?,
            ..self.clone()
        })
    }

    #[must_use]
    pub fn with_routing_cost(&self, routing_cost: i64) -> Self {
        Self {
            routing_cost,
            ..self.clone()
        }
    }

    pub fn with_max_velocity(&self, velocity: i32) -> Result<Self> {
        Ok(Self {
            max_velocity: bounds::velocity("maxVelocity", velocity)?,
            ..self.clone()
        })
    }

    pub fn with_max_reverse_velocity(&self, velocity: i32) -> Result<Self> {
        Ok(Self {
            max_reverse_velocity: bounds::velocity("maxReverseVelocity", velocity)?,
            ..self.clone()
        })
    }

    #[must_use]
    pub fn with_locked(&self, locked: bool) -> Self {
        Self {
            locked,
            ..self.clone()
        }
    }
}

/// Builder for [`PathDescriptor`].
#[derive(Debug, Clone)]
pub struct PathDescriptorBuilder {
    name: String,
    source_point: String,
    destination_point: String,
    length: i64,
    routing_cost: i64,
    max_velocity: i32,
    max_reverse_velocity: i32,
    locked: bool,
    properties: Properties,
}

builder_properties!(PathDescriptorBuilder);

impl PathDescriptorBuilder {
    #[must_use]
    pub fn length(mut self, length: i64) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn routing_cost(mut self, routing_cost: i64) -> Self {
        self.routing_cost = routing_cost;
        self
    }

    #[must_use]
    pub fn max_velocity(mut self, velocity: i32) -> Self {
        self.max_velocity = velocity;
        self
    }

    #[must_use]
    pub fn max_reverse_velocity(mut self, velocity: i32) -> Self {
        self.max_reverse_velocity = velocity;
        self
    }

    #[must_use]
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn build(self) -> Result<PathDescriptor> {
        bounds::name("path", &self.name)?;
        bounds::name("point", &self.source_point)?;
        bounds::name("point", &self.destination_point)?;
        Ok(PathDescriptor {
            length: bounds::length("length", self.length, MIN_PATH_LENGTH)?,
            max_velocity: bounds::velocity("maxVelocity", self.max_velocity)?,
            max_reverse_velocity: bounds::velocity("maxReverseVelocity", self.max_reverse_velocity)?,
            name: self.name,
            source_point: self.source_point,
            destination_point: self.destination_point,
            routing_cost: self.routing_cost,
            locked: self.locked,
            properties: self.properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let path = PathDescriptor::builder("P1-P2", "P1", "P2").build().unwrap();
        assert_eq!(path.length(), 1);
        assert_eq!(path.routing_cost(), 1);
        assert!(!path.is_locked());
    }

    #[test]
    fn zero_length_rejected() {
        let result = PathDescriptor::builder("P1-P2", "P1", "P2").length(0).build();
        assert_eq!(
            result,
            Err(ValidationError::BelowMinimum {
                field: "length",
                value: 0,
                minimum: 1,
            })
        );
    }

    #[test]
    fn zero_velocity_allowed_negative_rejected() {
        let path = PathDescriptor::builder("P1-P2", "P1", "P2")
            .max_reverse_velocity(0)
            .build()
            .unwrap();
        assert_eq!(path.max_reverse_velocity(), 0);
        assert!(path.with_max_velocity(-1).is_err());
        assert!(path.with_max_reverse_velocity(-1).is_err());
    }
}
