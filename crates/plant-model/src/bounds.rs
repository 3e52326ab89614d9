//! Field bounds shared by live entities and entity descriptors.
//!
//! Every constructor or mutator that accepts a bounded value runs it through
//! one of these checks. Out-of-range values are rejected, never clamped.

use thiserror::Error;

/// Smallest permitted path length in millimetres.
pub const MIN_PATH_LENGTH: i64 = 1;

/// Smallest permitted vehicle length in millimetres.
pub const MIN_VEHICLE_LENGTH: i64 = 1;

/// Absolute limit for vehicle orientation angles, in degrees.
pub const ORIENTATION_ANGLE_LIMIT: f64 = 360.0;

/// A value violates the bound of the field it was assigned to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Entity names are the only foreign key and must not be empty.
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    /// Value is below the field's minimum.
    #[error("{field} must be at least {minimum}, got {value}")]
    BelowMinimum {
        field: &'static str,
        value: i64,
        minimum: i64,
    },

    /// Value lies outside the field's closed range.
    #[error("{field} must be within [{minimum}, {maximum}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        minimum: i64,
        maximum: i64,
    },

    /// Orientation angle is neither NaN nor within [-360, 360].
    #[error("{field} must be NaN or within [-360, 360], got {value}")]
    InvalidAngle { field: &'static str, value: f64 },
}

/// Result type alias for bound checks.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Reject empty names.
pub fn name(kind: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::EmptyName { kind });
    }
    Ok(())
}

/// Lengths in millimetres with a kind-specific minimum.
pub fn length(field: &'static str, value: i64, minimum: i64) -> Result<i64> {
    if value < minimum {
        return Err(ValidationError::BelowMinimum {
            field,
            value,
            minimum,
        });
    }
    Ok(value)
}

/// Velocities in mm/s. Zero disallows movement in that direction.
pub fn velocity(field: &'static str, value: i32) -> Result<i32> {
    if value < 0 {
        return Err(ValidationError::BelowMinimum {
            field,
            value: i64::from(value),
            minimum: 0,
        });
    }
    Ok(value)
}

/// Percentages in [0, 100].
pub fn percentage(field: &'static str, value: i32) -> Result<i32> {
    if !(0..=100).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value: i64::from(value),
            minimum: 0,
            maximum: 100,
        });
    }
    Ok(value)
}

/// Orientation angles: NaN means "undefined".
pub fn orientation_angle(field: &'static str, value: f64) -> Result<f64> {
    if value.is_nan() || (-ORIENTATION_ANGLE_LIMIT..=ORIENTATION_ANGLE_LIMIT).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidAngle { field, value })
    }
}

/// Angle equality where two undefined (NaN) angles are the same angle.
pub fn same_angle(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}
