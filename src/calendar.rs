//! Calendars (iCal `VCALENDAR` item), that contain events

use std::collections::HashSet;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::event::{deserialize_some, Event, EventProperties};
use crate::properties::CustomProperties;
use crate::traits::{HostTimeZone, TimeZoneResolver};

/// Default value of `CALSCALE`
pub const DEFAULT_SCALE: &str = "GREGORIAN";
/// Default value of `METHOD`
pub const DEFAULT_METHOD: &str = "PUBLISH";


/// The values a [`Calendar`] is created from. Every field that is left to `None` takes its default value.
///
/// `time_zone` defaults to the timezone of the host. Set it to `Some(None)` to remove it from the calendar.
///
/// This can also be deserialized from a document with camelCase keys, where `"timeZone": null` removes the timezone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarOptions {
    /// Display name of the calendar (`X-WR-CALNAME`)
    pub name: Option<String>,
    /// Appended to every event UID (`<id>@<scope>`), so that they do not clash with other calendars.
    /// It is recommended to use a domain name, e.g. `example.com`
    pub scope: Option<String>,
    /// IANA name of the timezone of the whole calendar (`X-WR-TIMEZONE`)
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<Option<String>>,
    /// `CALSCALE`, defaults to `GREGORIAN`
    pub scale: Option<String>,
    /// `METHOD`, defaults to `PUBLISH`
    pub method: Option<String>,
    /// `PRODID`, defaults to [`crate::ical::default_prod_id`]
    pub product_id: Option<String>,
    pub custom: CustomProperties,
}


/// A calendar, that owns a list of events with unique ids
///
/// A deserialized calendar goes through [`Calendar::add_events`], so that a document with duplicate ids is rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CalendarSnapshot")]
pub struct Calendar {
    name: Option<String>,
    scope: Option<String>,
    time_zone: Option<String>,
    scale: String,
    method: String,
    product_id: String,
    custom: CustomProperties,

    events: Vec<Event>,
}

/// The serialized form of a [`Calendar`], before its events are checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarSnapshot {
    name: Option<String>,
    scope: Option<String>,
    time_zone: Option<String>,
    scale: String,
    method: String,
    product_id: String,
    #[serde(default)]
    custom: CustomProperties,
    #[serde(default)]
    events: Vec<Event>,
}

impl TryFrom<CalendarSnapshot> for Calendar {
    type Error = Error;

    fn try_from(snapshot: CalendarSnapshot) -> Result<Self> {
        let mut calendar = Calendar {
            name: snapshot.name,
            scope: snapshot.scope,
            time_zone: snapshot.time_zone,
            scale: snapshot.scale,
            method: snapshot.method,
            product_id: snapshot.product_id,
            custom: snapshot.custom,
            events: Vec::new(),
        };
        calendar.add_events(snapshot.events)?;
        Ok(calendar)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(CalendarOptions::default())
    }
}

impl Calendar {
    /// Create a new calendar, with no event.
    /// Its default timezone is the one of the host.
    pub fn new(options: CalendarOptions) -> Self {
        Self::new_with(options, &HostTimeZone)
    }

    /// Create a new calendar, with no event.
    /// Its default timezone is resolved by `time_zones`
    pub fn new_with(options: CalendarOptions, time_zones: &dyn TimeZoneResolver) -> Self {
        let time_zone = match options.time_zone {
            Some(tz) => tz,
            None => time_zones.local_time_zone(),
        };

        Self {
            name: options.name,
            scope: options.scope,
            time_zone,
            scale: options.scale.unwrap_or_else(|| DEFAULT_SCALE.to_string()),
            method: options.method.unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            product_id: options.product_id.unwrap_or_else(crate::ical::default_prod_id),
            custom: options.custom,
            events: Vec::new(),
        }
    }

    pub fn name(&self) -> Option<&str>          { self.name.as_deref() }
    pub fn scope(&self) -> Option<&str>         { self.scope.as_deref() }
    pub fn time_zone(&self) -> Option<&str>     { self.time_zone.as_deref() }
    pub fn scale(&self) -> &str                 { &self.scale }
    pub fn method(&self) -> &str                { &self.method }
    pub fn product_id(&self) -> &str            { &self.product_id }
    pub fn custom(&self) -> &CustomProperties   { &self.custom }
    pub fn custom_mut(&mut self) -> &mut CustomProperties { &mut self.custom }

    /// The events of this calendar, in the order they have been added
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn set_name(&mut self, name: Option<String>) -> &mut Self {
        self.name = name;
        self
    }

    pub fn set_scope(&mut self, scope: Option<String>) -> &mut Self {
        self.scope = scope;
        self
    }

    /// Change the timezone of the calendar, or remove it with `None`
    pub fn set_time_zone(&mut self, time_zone: Option<String>) -> &mut Self {
        self.time_zone = time_zone;
        self
    }

    /// Add an event at the end of this calendar.
    ///
    /// This fails (and leaves the calendar untouched) if an event with the same id is already present.
    /// Returns the calendar, so that several calls can be chained.
    pub fn add_event(&mut self, event: Event) -> Result<&mut Self> {
        if self.event(event.id()).is_some() {
            log::warn!("Refusing to add event {}: its id is already present in the calendar", event.id());
            return Err(Error::DuplicateIdentifier(event.id().to_string()));
        }

        log::debug!("Adding event {} to calendar", event.id());
        self.events.push(event);
        Ok(self)
    }

    /// Create an event from its properties (see [`Event::new`]) and add it at the end of this calendar
    pub fn add_event_from(&mut self, properties: EventProperties) -> Result<&mut Self> {
        let event = Event::new(properties)?;
        self.add_event(event)
    }

    /// Add several events at once.
    ///
    /// Either every event is added, or none is (in case any id is already present, or is present twice among `events`)
    pub fn add_events<I: IntoIterator<Item = Event>>(&mut self, events: I) -> Result<&mut Self> {
        let events: Vec<Event> = events.into_iter().collect();

        let mut seen: HashSet<&str> = self.events.iter().map(|e| e.id()).collect();
        for event in &events {
            if !seen.insert(event.id()) {
                log::warn!("Refusing to add {} events: id {} is already present", events.len(), event.id());
                return Err(Error::DuplicateIdentifier(event.id().to_string()));
            }
        }

        log::debug!("Adding {} events to calendar", events.len());
        self.events.extend(events);
        Ok(self)
    }

    /// Remove the event with the given id, and return it.
    /// This does nothing (and returns `None`) if there is no such event.
    pub fn remove_event(&mut self, id: &str) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id() == id)?;
        log::debug!("Removing event {} from calendar", id);
        Some(self.events.remove(index))
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id() == id)
    }

    /// Returns a mutable reference to an event. Its id cannot be changed, so that ids remain unique in this calendar
    pub fn event_mut(&mut self, id: &str) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id() == id)
    }

    /// Format the calendar and all its events as an iCal file
    pub fn to_ics(&self) -> String {
        log::debug!("Formatting calendar with {} events", self.events.len());
        crate::ical::build_calendar(self)
    }
}

impl Display for Calendar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_ics())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FixedTimeZone;

    fn event_with_id(id: &str) -> Event {
        let start = "2022-08-17T17:00:00Z".parse().unwrap();
        Event::new(EventProperties::starting_at(start).with_id(id)).unwrap()
    }

    fn calendar() -> Calendar {
        Calendar::new_with(CalendarOptions::default(), &FixedTimeZone(Some("Europe/Paris".to_string())))
    }

    #[test]
    fn test_calendar_defaults() {
        let cal = calendar();
        assert_eq!(cal.name(), None);
        assert_eq!(cal.scope(), None);
        assert_eq!(cal.time_zone(), Some("Europe/Paris"));
        assert_eq!(cal.scale(), "GREGORIAN");
        assert_eq!(cal.method(), "PUBLISH");
        assert!(cal.events().is_empty());
    }

    #[test]
    fn test_explicit_time_zone_wins() {
        let options = CalendarOptions {
            time_zone: Some(Some("fake/timezone".to_string())),
            ..CalendarOptions::default()
        };
        let mut cal = Calendar::new_with(options, &FixedTimeZone(Some("Europe/Paris".to_string())));
        assert_eq!(cal.time_zone(), Some("fake/timezone"));

        cal.set_time_zone(None);
        assert_eq!(cal.time_zone(), None);
    }

    #[test]
    fn test_add_events_is_atomic() {
        let mut cal = calendar();
        cal.add_event(event_with_id("1")).unwrap();

        let err = cal.add_events(vec![event_with_id("2"), event_with_id("3"), event_with_id("2")]).unwrap_err();
        assert_eq!(err, Error::DuplicateIdentifier("2".to_string()));
        assert_eq!(cal.events().len(), 1);

        let err = cal.add_events(vec![event_with_id("4"), event_with_id("1")]).unwrap_err();
        assert_eq!(err, Error::DuplicateIdentifier("1".to_string()));
        assert_eq!(cal.events().len(), 1);

        cal.add_events(vec![event_with_id("2"), event_with_id("3")]).unwrap();
        let ids: Vec<&str> = cal.events().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_add_event_from_properties() {
        let mut cal = calendar();
        let start = "2022-08-17T17:00:00Z".parse().unwrap();
        cal.add_event_from(EventProperties::starting_at(start).with_id("0").with_summary("a,b")).unwrap();
        assert_eq!(cal.event("0").unwrap().summary(), Some("a\\,b"));

        let err = cal.add_event_from(EventProperties::starting_at(start).with_id("0")).unwrap_err();
        assert_eq!(err, Error::DuplicateIdentifier("0".to_string()));

        let err = cal.add_event_from(EventProperties::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(cal.events().len(), 1);
    }

    #[test]
    fn test_event_mut() {
        let mut cal = calendar();
        cal.add_event(event_with_id("1")).unwrap();
        cal.event_mut("1").unwrap().set_revision(2);
        assert_eq!(cal.event("1").unwrap().revision(), 2);
        assert!(cal.event_mut("nope").is_none());
    }
}
