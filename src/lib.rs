//! This crate provides a way to build calendars and export them as iCalendar files ([RFC 5545](https://tools.ietf.org/html/rfc5545)).
//!
//! A [`Calendar`] owns a list of [`Event`]s, whose ids are unique inside the calendar. \
//! Once built, a calendar is formatted with [`Calendar::to_ics`] (or through its `Display` implementation).
//!
//! ```
//! use ayecal::{Calendar, CalendarOptions, Event, EventProperties};
//!
//! let start = "2022-08-17T17:00:00Z".parse().unwrap();
//! let mut calendar = Calendar::new(CalendarOptions {
//!     name: Some("Parties".to_string()),
//!     scope: Some("example.com".to_string()),
//!     ..CalendarOptions::default()
//! });
//! calendar
//!     .add_event(Event::new(EventProperties::starting_at(start).with_summary("Birthday party")).unwrap())
//!     .unwrap();
//!
//! let ics = calendar.to_ics();
//! assert!(ics.starts_with("BEGIN:VCALENDAR\nPRODID:"));
//! ```
//!
//! Parsing iCal files is not supported.

pub mod traits;

pub mod calendar;
pub use calendar::{Calendar, CalendarOptions};
pub mod event;
pub use event::{Event, EventProperties};
mod properties;
pub use properties::{CustomProperties, EventStatus};
mod error;
pub use error::{Error, Result};

pub mod ical;
pub mod config;
pub mod utils;
