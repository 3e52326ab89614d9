use plant_model::bounds::{self, MIN_VEHICLE_LENGTH};
use plant_model::{EnergyLevels, Properties, ValidationError};

use super::{builder_properties, named_descriptor};

type Result<T> = std::result::Result<T, ValidationError>;

/// A vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDescriptor {
    name: String,
    length: i64,
    energy_level_critical: i32,
    energy_level_good: i32,
    energy_level_fully_recharged: i32,
    energy_level_sufficiently_recharged: i32,
    max_velocity: i32,
    max_reverse_velocity: i32,
    properties: Properties,
}

named_descriptor!(VehicleDescriptor, "vehicle");

impl VehicleDescriptor {
    pub fn builder(name: impl Into<String>) -> VehicleDescriptorBuilder {
        let levels = EnergyLevels::default();
        VehicleDescriptorBuilder {
            name: name.into(),
            length: 1000,
            energy_level_critical: levels.critical,
            energy_level_good: levels.good,
            energy_level_fully_recharged: levels.fully_recharged,
            energy_level_sufficiently_recharged: levels.sufficiently_recharged,
            max_velocity: 1000,
            max_reverse_velocity: 1000,
            properties: Properties::new(),
        }
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn energy_level_critical(&self) -> i32 {
        self.energy_level_critical
    }

    pub fn energy_level_good(&self) -> i32 {
        self.energy_level_good
    }

    pub fn energy_level_fully_recharged(&self) -> i32 {
        self.energy_level_fully_recharged
    }

    pub fn energy_level_sufficiently_recharged(&self) -> i32 {
        self.energy_level_sufficiently_recharged
    }

    pub fn energy_levels(&self) -> EnergyLevels {
        EnergyLevels {
            critical: self.energy_level_critical,
            good: self.energy_level_good,
            fully_recharged: self.energy_level_fully_recharged,
            sufficiently_recharged: self.energy_level_sufficiently_recharged,
        }
    }

    pub fn max_velocity(&self) -> i32 {
        self.max_velocity
    }

    pub fn max_reverse_velocity(&self) -> i32 {
        self.max_reverse_velocity
    }

    pub fn with_length(&self, length: i64) -> Result<Self> {
        Ok(Self {
            length: bounds::length("length", length, MIN_VEHICLE_LENGTH)?,
            ..self.clone()
        })
    }

    pub fn with_energy_level_critical(&self, level: i32) -> Result<Self> {
        Ok(Self {
            energy_level_critical: bounds::percentage("energyLevelCritical", level)?,
            ..self.clone()
        })
    }

    pub fn with_energy_level_good(&self, level: i32) -> Result<Self> {
        Ok(Self {
            energy_level_good: bounds::percentage("energyLevelGood", level)?,
            ..self.clone()
        })
    }

    pub fn with_energy_level_fully_recharged(&self, level: i32) -> Result<Self> {
        Ok(Self {
            energy_level_fully_recharged: bounds::percentage("energyLevelFullyRecharged", level)?,
            ..self.clone()
        })
    }

    pub fn with_energy_level_sufficiently_recharged(&self, level: i32) -> Result<Self> {
        Ok(Self {
            energy_level_sufficiently_recharged: bounds::percentage(
                "energyLevelSufficientlyRecharged",
                level,
            )?,
            ..self.clone()
        })
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
}

/// Builder for [`VehicleDescriptor`].
#[derive(Debug, Clone)]
pub struct VehicleDescriptorBuilder {
    name: String,
    length: i64,
    energy_level_critical: i32,
    energy_level_good: i32,
    energy_level_fully_recharged: i32,
    energy_level_sufficiently_recharged: i32,
    max_velocity: i32,
    max_reverse_velocity: i32,
    properties: Properties,
}

builder_properties!(VehicleDescriptorBuilder);

impl VehicleDescriptorBuilder {
    #[must_use]
    pub fn length(mut self, length: i64) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn energy_level_critical(mut self, level: i32) -> Self {
        self.energy_level_critical = level;
        self
    }

    #[must_use]
    pub fn energy_level_good(mut self, level: i32) -> Self {
        self.energy_level_good = level;
        self
    }

    #[must_use]
    pub fn energy_level_fully_recharged(mut self, level: i32) -> Self {
        self.energy_level_fully_recharged = level;
        self
    }

    #[must_use]
    pub fn energy_level_sufficiently_recharged(mut self, level: i32) -> Self {
        self.energy_level_sufficiently_recharged = level;
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

    pub fn build(self) -> Result<VehicleDescriptor> {
        bounds::name("vehicle", &self.name)?;
        let levels = EnergyLevels {
            critical: self.energy_level_critical,
            good: self.energy_level_good,
            fully_recharged: self.energy_level_fully_recharged,
            sufficiently_recharged: self.energy_level_sufficiently_recharged,
        }
        .validated()?;
        Ok(VehicleDescriptor {
            length: bounds::length("length", self.length, MIN_VEHICLE_LENGTH)?,
            max_velocity: bounds::velocity("maxVelocity", self.max_velocity)?,
            max_reverse_velocity: bounds::velocity("maxReverseVelocity", self.max_reverse_velocity)?,
            energy_level_critical: levels.critical,
            energy_level_good: levels.good,
            energy_level_fully_recharged: levels.fully_recharged,
            energy_level_sufficiently_recharged: levels.sufficiently_recharged,
            name: self.name,
            properties: self.properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn critical_energy_above_hundred_rejected() {
        let result = VehicleDescriptor::builder("V1").energy_level_critical(150).build();
        assert_eq!(
            result,
            Err(ValidationError::OutOfRange {
                field: "energyLevelCritical",
                value: 150,
                minimum: 0,
                maximum: 100,
            })
        );
    }

    #[test]
    fn zero_length_rejected() {
        assert!(VehicleDescriptor::builder("V1").length(0).build().is_err());
        let vehicle = VehicleDescriptor::builder("V1").build().unwrap();
        assert!(vehicle.with_length(0).is_err());
        assert_eq!(vehicle.with_length(1).unwrap().length(), 1);
    }

    proptest! {
        #[test]
        fn energy_withers_follow_percentage_bounds(level in -50i32..150) {
            let vehicle = VehicleDescriptor::builder("V1").build().unwrap();
            let in_range = (0..=100).contains(&level);
            prop_assert_eq!(vehicle.with_energy_level_good(level).is_ok(), in_range);
            prop_assert_eq!(vehicle.with_energy_level_fully_recharged(level).is_ok(), in_range);
        }
    }
}
