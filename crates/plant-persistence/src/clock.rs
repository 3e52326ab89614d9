//! UTC time source for backup names.

use chrono::{DateTime, Utc};

/// Sortable backup timestamp, e.g. `20240131-235959-123`.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S-%3f";

/// A source of the current UTC time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current time in [`BACKUP_TIMESTAMP_FORMAT`].
    fn backup_timestamp(&self) -> String {
        self.now().format(BACKUP_TIMESTAMP_FORMAT).to_string()
    }
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_milliseconds() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(7);
        assert_eq!(FixedClock(instant).backup_timestamp(), "20240131-235959-007");
    }
}
