use crate::bounds::{self, ValidationError};
use crate::entity::{Entity, Properties, apply_property, entity_basics};
use crate::geometry::{PointType, Triple};
use crate::model::EntityKind;

/// A navigation point.
#[derive(Debug, Clone)]
pub struct Point {
    name: String,
    position: Triple,
    vehicle_orientation_angle: f64,
    point_type: PointType,
    properties: Properties,
}

impl Point {
    /// A halt point at the origin with an undefined orientation angle.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Triple::default(),
            vehicle_orientation_angle: f64::NAN,
            point_type: PointType::default(),
            properties: Properties::new(),
        }
    }

    pub fn position(&self) -> Triple {
        self.position
    }

    /// Orientation in degrees; NaN when undefined.
    pub fn vehicle_orientation_angle(&self) -> f64 {
        self.vehicle_orientation_angle
    }

    pub fn point_type(&self) -> PointType {
        self.point_type
    }

    pub fn set_position(&mut self, position: Triple) {
        self.position = position;
    }

    pub fn set_vehicle_orientation_angle(&mut self, angle: f64) -> Result<(), ValidationError> {
        self.vehicle_orientation_angle = bounds::orientation_angle("vehicleOrientationAngle", angle)?;
        Ok(())
    }

    pub fn set_point_type(&mut self, point_type: PointType) {
        self.point_type = point_type;
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Option<String>) {
        apply_property(&mut self.properties, key, value);
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.position == other.position
            && bounds::same_angle(self.vehicle_orientation_angle, other.vehicle_orientation_angle)
            && self.point_type == other.point_type
            && self.properties == other.properties
    }
}

impl Entity for Point {
    entity_basics!(Point, EntityKind::Point, points);
}
