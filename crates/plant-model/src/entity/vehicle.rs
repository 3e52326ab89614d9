use crate::bounds::{self, MIN_VEHICLE_LENGTH, ValidationError};
use crate::entity::{Entity, Properties, apply_property, entity_basics};
use crate::model::EntityKind;

type Result<T> = std::result::Result<T, ValidationError>;

/// Energy level thresholds in percent.
///
/// `critical <= sufficiently_recharged <= good <= fully_recharged` is the
/// expected ordering, but only the individual [0, 100] bounds are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyLevels {
    pub critical: i32,
    pub good: i32,
    pub fully_recharged: i32,
    pub sufficiently_recharged: i32,
}

impl Default for EnergyLevels {
    fn default() -> Self {
        Self {
            critical: 30,
            good: 90,
            fully_recharged: 90,
            sufficiently_recharged: 30,
        }
    }
}

impl EnergyLevels {
    /// Check each threshold against [0, 100].
    pub fn validated(self) -> Result<Self> {
        bounds::percentage("energyLevelCritical", self.critical)?;
        bounds::percentage("energyLevelGood", self.good)?;
        bounds::percentage("energyLevelFullyRecharged", self.fully_recharged)?;
        bounds::percentage("energyLevelSufficientlyRecharged", self.sufficiently_recharged)?;
        Ok(self)
    }
}

/// A vehicle known to the plant model.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    name: String,
    length: i64,
    energy_levels: EnergyLevels,
    max_velocity: i32,
    max_reverse_velocity: i32,
    properties: Properties,
}

impl Vehicle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: 1000,
            energy_levels: EnergyLevels::default(),
            max_velocity: 1000,
            max_reverse_velocity: 1000,
            properties: Properties::new(),
        }
    }

    /// Length in millimetres.
    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn energy_levels(&self) -> EnergyLevels {
        self.energy_levels
    }

    pub fn max_velocity(&self) -> i32 {
        self.max_velocity
    }

    pub fn max_reverse_velocity(&self) -> i32 {
        self.max_reverse_velocity
    }

    pub fn set_length(&mut self, length: i64) -> Result<()> {
        self.length = bounds::length("length", length, MIN_VEHICLE_LENGTH)?;
        Ok(())
    }

    pub fn set_energy_levels(&mut self, levels: EnergyLevels) -> Result<()> {
        self.energy_levels = levels.validated()?;
        Ok(())
    }

    pub fn set_max_velocity(&mut self, velocity: i32) -> Result<()> {
        self.max_velocity = bounds::velocity("maxVelocity", velocity)?;
        Ok(())
    }

    pub fn set_max_reverse_velocity(&mut self, velocity: i32) -> Result<()> {
        self.max_reverse_velocity = bounds::velocity("maxReverseVelocity", velocity)?;
        Ok(())
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Option<String>) {
        apply_property(&mut self.properties, key, value);
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }
}

impl Entity for Vehicle {
    entity_basics!(Vehicle, EntityKind::Vehicle, vehicles);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_levels_reject_out_of_range() {
        let levels = EnergyLevels {
            critical: 150,
            ..EnergyLevels::default()
        };
        assert!(levels.validated().is_err());
    }

    #[test]
    fn energy_levels_ordering_not_enforced() {
        let levels = EnergyLevels {
            critical: 95,
            good: 10,
            fully_recharged: 5,
            sufficiently_recharged: 50,
        };
        assert!(levels.validated().is_ok());
    }

    #[test]
    fn vehicle_length_must_be_at_least_one() {
        let mut vehicle = Vehicle::new("V1");
        assert!(vehicle.set_length(0).is_err());
        assert!(vehicle.set_length(1).is_ok());
        assert_eq!(vehicle.length(), 1);
    }
}
