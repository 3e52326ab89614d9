use plant_model::{Properties, PointType, Triple, ValidationError, bounds};

use super::{builder_properties, named_descriptor};

type Result<T> = std::result::Result<T, ValidationError>;

/// A navigation point.
#[derive(Debug, Clone)]
pub struct PointDescriptor {
    name: String,
    position: Triple,
    vehicle_orientation_angle: f64,
    point_type: PointType,
    properties: Properties,
}

named_descriptor!(PointDescriptor, "point");

/// Undefined angles compare equal, so a default point equals its own copy.
impl PartialEq for PointDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.position == other.position
            && bounds::same_angle(self.vehicle_orientation_angle, other.vehicle_orientation_angle)
            && self.point_type == other.point_type
            && self.properties == other.properties
    }
}

impl PointDescriptor {
    pub fn builder(name: impl Into<String>) -> PointDescriptorBuilder {
        PointDescriptorBuilder {
            name: name.into(),
            position: Triple::default(),
            vehicle_orientation_angle: f64::NAN,
            point_type: PointType::default(),
            properties: Properties::new(),
        }
    }

    /// A halt point at the origin with an undefined orientation angle.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::builder(name).build()
    }

    pub fn position(&self) -> Triple {
        self.position
    }

    pub fn vehicle_orientation_angle(&self) -> f64 {
        self.vehicle_orientation_angle
    }

    pub fn point_type(&self) -> PointType {
        self.point_type
    }

    #[must_use]
    pub fn with_position(&self, position: Triple) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    pub fn with_vehicle_orientation_angle(&self, angle: f64) -> Result<Self> {
        Ok(Self {
            vehicle_orientation_angle: bounds::orientation_angle("vehicleOrientationAngle", angle)?,
            ..self.clone()
        })
    }

    #[must_use]
    pub fn with_point_type(&self, point_type: PointType) -> Self {
        Self {
            point_type,
            ..self.clone()
        }
    }
}

/// Builder for [`PointDescriptor`].
#[derive(Debug, Clone)]
pub struct PointDescriptorBuilder {
    name: String,
    position: Triple,
    vehicle_orientation_angle: f64,
    point_type: PointType,
    properties: Properties,
}

builder_properties!(PointDescriptorBuilder);

impl PointDescriptorBuilder {
    #[must_use]
    pub fn position(mut self, position: Triple) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn vehicle_orientation_angle(mut self, angle: f64) -> Self {
        self.vehicle_orientation_angle = angle;
        self
    }

    #[must_use]
    pub fn point_type(mut self, point_type: PointType) -> Self {
        self.point_type = point_type;
        self
    }

    pub fn build(self) -> Result<PointDescriptor> {
        bounds::name("point", &self.name)?;
        Ok(PointDescriptor {
            vehicle_orientation_angle: bounds::orientation_angle(
                "vehicleOrientationAngle",
                self.vehicle_orientation_angle,
            )?,
            name: self.name,
            position: self.position,
            point_type: self.point_type,
            properties: self.properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_undefined_angle() {
        let point = PointDescriptor::new("P1").unwrap();
        assert!(point.vehicle_orientation_angle().is_nan());
        assert_eq!(point.point_type(), PointType::Halt);
    }

    #[test]
    fn withers_leave_original_untouched() {
        let point = PointDescriptor::new("P1").unwrap();
        let moved = point.with_position(Triple::new(5, 6, 7));
        assert_eq!(point.position(), Triple::default());
        assert_eq!(moved.position(), Triple::new(5, 6, 7));
        assert_eq!(moved.name(), "P1");
    }

    #[test]
    fn rejects_out_of_range_angle() {
        assert!(PointDescriptor::builder("P1")
            .vehicle_orientation_angle(400.0)
            .build()
            .is_err());
        let point = PointDescriptor::new("P1").unwrap();
        assert!(point.with_vehicle_orientation_angle(-361.0).is_err());
        assert_eq!(
            point.with_vehicle_orientation_angle(-90.0).unwrap().vehicle_orientation_angle(),
            -90.0
        );
    }

    #[test]
    fn undefined_angle_equals_itself() {
        let point = PointDescriptor::new("P1").unwrap();
        assert_eq!(point, point.clone());
        assert_ne!(point, point.with_vehicle_orientation_angle(0.0).unwrap());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(PointDescriptor::new("").is_err());
        assert!(PointDescriptor::new("P1").unwrap().with_name("").is_err());
    }
}
