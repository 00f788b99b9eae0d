//! This module handles conversion from internal representations to iCal files
//!
//! Only the generation is supported. Files are written with LF line endings and lines are not folded.

mod builder;
pub use builder::{build_calendar, build_event};

use crate::config::{read_part, ORG_NAME, PRODUCT_NAME};

/// The iCalendar version written in every `VERSION` line
pub const ICAL_VERSION: &str = "2.0";

/// The ProdID given to new calendars, built from [`crate::config`]
pub fn default_prod_id() -> String {
    format!("-//{}//{}//EN", read_part(&ORG_NAME), read_part(&PRODUCT_NAME))
}
