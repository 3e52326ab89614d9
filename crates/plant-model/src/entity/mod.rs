//! Live entity types.
//!
//! Entities hold typed references ([`crate::Id`]) to the entities they depend
//! on. Names change only through [`crate::PlantModel::rename`], so every
//! reference held by id follows a rename.

mod block;
mod group;
mod layout;
mod location;
mod path;
mod point;
mod vehicle;

pub use block::Block;
pub use group::Group;
pub use layout::{DEFAULT_SCALE, ModelLayoutElement, ShapeLayoutElement, VisualLayout};
pub use location::{Link, Location, LocationType};
pub use path::{DEFAULT_PATH_VELOCITY, DEFAULT_ROUTING_COST, Path};
pub use point::Point;
pub use vehicle::{EnergyLevels, Vehicle};

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::{EntityKind, PlantModel};
use crate::pool::Pool;

/// String properties attached to every entity. Kept sorted by key.
pub type Properties = BTreeMap<String, String>;

/// Set a property, or remove it when `value` is `None`.
pub fn apply_property(properties: &mut Properties, key: impl Into<String>, value: Option<String>) {
    let key = key.into();
    match value {
        Some(value) => {
            properties.insert(key, value);
        }
        None => {
            properties.remove(&key);
        }
    }
}

/// Capability token restricting pool-internal operations to this crate.
pub struct Sealed(pub(crate) ());

/// An entity kind stored in its own pool of a [`PlantModel`].
pub trait Entity: Sized + 'static {
    const KIND: EntityKind;

    fn name(&self) -> &str;

    fn properties(&self) -> &Properties;

    #[doc(hidden)]
    fn set_name(&mut self, name: String, token: Sealed);

    #[doc(hidden)]
    fn pool(model: &PlantModel) -> &Pool<Self>;

    #[doc(hidden)]
    fn pool_mut(model: &mut PlantModel, token: Sealed) -> &mut Pool<Self>;

    /// Verify that every id this entity holds addresses an entity of `model`.
    #[doc(hidden)]
    fn check_references(&self, _model: &PlantModel) -> Result<()> {
        Ok(())
    }
}

macro_rules! entity_basics {
    ($type:ty, $kind:expr, $field:ident) => {
        const KIND: $crate::model::EntityKind = $kind;

        fn name(&self) -> &str {
            &self.name
        }

        fn properties(&self) -> &$crate::entity::Properties {
            &self.properties
        }

        fn set_name(&mut self, name: String, _token: $crate::entity::Sealed) {
            self.name = name;
        }

        fn pool(model: &$crate::model::PlantModel) -> &$crate::pool::Pool<$type> {
            &model.$field
        }

        fn pool_mut(
            model: &mut $crate::model::PlantModel,
            _token: $crate::entity::Sealed,
        ) -> &mut $crate::pool::Pool<$type> {
            &mut model.$field
        }
    };
}

pub(crate) use entity_basics;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_property_removes_on_none() {
        let mut properties = Properties::new();
        apply_property(&mut properties, "color", Some("red".to_string()));
        assert_eq!(properties.get("color").map(String::as_str), Some("red"));

        apply_property(&mut properties, "color", None);
        assert!(properties.is_empty());

        // Removing an absent key is a no-op.
        apply_property(&mut properties, "color", None);
        assert!(properties.is_empty());
    }
}
