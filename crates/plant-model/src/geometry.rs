//! Positions and point types.

use std::fmt;
use std::str::FromStr;

/// A position in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Triple {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Triple {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// What a vehicle may do at a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointType {
    /// Vehicles may halt here.
    #[default]
    Halt,
    /// Vehicles only report passing this point.
    Report,
    /// Vehicles may park here.
    Park,
}

impl PointType {
    /// The name used in persisted documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            PointType::Halt => "HALT_POSITION",
            PointType::Report => "REPORT_POSITION",
            PointType::Park => "PARK_POSITION",
        }
    }
}

impl fmt::Display for PointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "HALT_POSITION" => Ok(PointType::Halt),
            "REPORT_POSITION" => Ok(PointType::Report),
            "PARK_POSITION" => Ok(PointType::Park),
            other => Err(format!("Unknown point type: {other}")),
        }
    }
}
