//! Host facilities that calendars and events depend on.
//!
//! Every constructor that needs the current time, the local timezone or a fresh identifier
//! has a `new_with` variant that takes these capabilities explicitly, so that tests can substitute fixed values.

use chrono::{DateTime, Utc};

/// A source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Resolves the name of the local timezone (e.g. `Europe/Paris`)
pub trait TimeZoneResolver {
    /// Returns `None` in case the timezone cannot be determined
    fn local_time_zone(&self) -> Option<String>;
}

/// Generates identifiers for events that have not been given one
pub trait IdGenerator {
    fn generate_id(&self) -> String;
}


/// The system wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The timezone configured on the host
#[derive(Clone, Copy, Debug, Default)]
pub struct HostTimeZone;

impl TimeZoneResolver for HostTimeZone {
    fn local_time_zone(&self) -> Option<String> {
        match iana_time_zone::get_timezone() {
            Ok(tz) => Some(tz),
            Err(err) => {
                log::warn!("Unable to determine the local timezone: {}. X-WR-TIMEZONE will not be set", err);
                None
            }
        }
    }
}

/// Random UUID v4 identifiers
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        crate::utils::random_id()
    }
}


/// A clock that always returns the same instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A resolver that always returns the same timezone (or none)
#[derive(Clone, Debug)]
pub struct FixedTimeZone(pub Option<String>);

impl TimeZoneResolver for FixedTimeZone {
    fn local_time_zone(&self) -> Option<String> {
        self.0.clone()
    }
}
