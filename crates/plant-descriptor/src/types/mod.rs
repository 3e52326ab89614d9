//! Descriptor types, one per entity kind, plus the root descriptor tree.

mod block;
mod group;
mod layout;
mod location;
mod model;
mod path;
mod point;
mod reference;
mod vehicle;

pub use block::{BlockDescriptor, BlockDescriptorBuilder};
pub use group::{GroupDescriptor, GroupDescriptorBuilder};
pub use layout::{
    ModelLayoutElementDescriptor, ShapeLayoutElementDescriptor, VisualLayoutDescriptor,
    VisualLayoutDescriptorBuilder,
};
pub use location::{
    LinkDescriptor, LocationDescriptor, LocationDescriptorBuilder, LocationTypeDescriptor,
    LocationTypeDescriptorBuilder,
};
pub use model::{MODEL_VERSION, PlantModelDescriptor};
pub use path::{PathDescriptor, PathDescriptorBuilder};
pub use point::{PointDescriptor, PointDescriptorBuilder};
pub use reference::ObjectName;
pub use vehicle::{VehicleDescriptor, VehicleDescriptorBuilder};

/// Accessors and copy-returning withers shared by every named descriptor.
macro_rules! named_descriptor {
    ($type:ident, $kind:literal) => {
        impl $type {
            pub fn name(&self) -> &str {
                &self.name
            }

            pub fn properties(&self) -> &plant_model::Properties {
                &self.properties
            }

            pub fn property(&self, key: &str) -> Option<&str> {
                self.properties.get(key).map(String::as_str)
            }

            pub fn with_name(
                &self,
                name: impl Into<String>,
            ) -> std::result::Result<Self, plant_model::ValidationError> {
                let name = name.into();
                plant_model::bounds::name($kind, &name)?;
                Ok(Self {
                    name,
                    ..self.clone()
                })
            }

            #[must_use]
            pub fn with_properties(&self, properties: plant_model::Properties) -> Self {
                Self {
                    properties,
                    ..self.clone()
                }
            }

            /// Copy with `key` set to `value`, or removed when `value` is `None`.
            #[must_use]
            pub fn with_property(&self, key: impl Into<String>, value: Option<&str>) -> Self {
                let mut copy = self.clone();
                plant_model::apply_property(&mut copy.properties, key, value.map(str::to_string));
                copy
            }
        }
    };
}

/// Property setters shared by every descriptor builder.
macro_rules! builder_properties {
    ($type:ident) => {
        impl $type {
            #[must_use]
            pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
                self.properties.insert(key.into(), value.into());
                self
            }

            #[must_use]
            pub fn properties(mut self, properties: plant_model::Properties) -> Self {
                self.properties = properties;
                self
            }
        }
    };
}

pub(crate) use builder_properties;
pub(crate) use named_descriptor;
