//! Calendar events (iCal `VEVENT` item)

use std::convert::TryFrom;

use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::properties::{CustomProperties, EventStatus};
use crate::traits::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::utils::{escape_text, is_escaped};


/// The values an [`Event`] is created from.
///
/// Only `start_time` is required. Any other field that is left to `None` takes its default value.
/// For `created_time`, `updated_time` and `busy`, `Some(None)` explicitly leaves the field unset.
///
/// This can also be deserialized from a document with camelCase keys (e.g. `{"startTime": "2022-08-17T17:00:00Z"}`),
/// in which case a `null` value for one of the fields above explicitly unsets it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventProperties {
    pub id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub created_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<Option<DateTime<Utc>>>,
    pub time_stamp: Option<DateTime<Utc>>,
    pub revision: Option<u32>,
    pub status: Option<EventStatus>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub busy: Option<Option<bool>>,
    pub custom: CustomProperties,
}

/// Tells a missing key (`None`) from an explicit `null` (`Some(None)`)
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl EventProperties {
    /// Properties of an event that starts at a given time, all other fields being defaulted
    pub fn starting_at(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time: Some(start_time),
            ..Self::default()
        }
    }

    /// Set the start time from an RFC 3339 string (e.g. `2022-08-17T17:00:00+10:00`)
    pub fn with_start_time_rfc3339(mut self, start_time: &str) -> Result<Self> {
        let parsed = DateTime::parse_from_rfc3339(start_time)
            .map_err(|err| Error::InvalidArgument(format!("{:?} is not a valid start time: {}", start_time, err)))?;
        self.start_time = Some(parsed.with_timezone(&Utc));
        Ok(self)
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_summary<S: Into<String>>(mut self, summary: S) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location<S: Into<String>>(mut self, location: S) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_revision(mut self, revision: u32) -> Self {
        self.revision = Some(revision);
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_busy(mut self, busy: bool) -> Self {
        self.busy = Some(Some(busy));
        self
    }

    pub fn with_custom<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.custom.insert(name, value);
        self
    }
}


/// A calendar event
///
/// Serialized events hold their text fields in escaped form.
/// Deserializing an event whose summary, description or location is not escaped fails.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "EventSnapshot")]
pub struct Event {
    /// Unique identifier of this event inside its calendar.
    /// The exported UID is this id, suffixed with the calendar scope (if any)
    id: String,

    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,

    /// Escaped text fields
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,

    created_time: Option<DateTime<Utc>>,
    updated_time: Option<DateTime<Utc>>,
    /// When this representation of the event has been generated
    time_stamp: DateTime<Utc>,

    /// Incremented by the caller every time the event is significantly changed
    revision: u32,
    status: Option<EventStatus>,
    /// Whether this event consumes time on a calendar (`TRANSP:OPAQUE`) or not (`TRANSP:TRANSPARENT`)
    busy: Option<bool>,

    custom: CustomProperties,
}

/// The serialized form of an [`Event`], before its text fields are checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventSnapshot {
    id: String,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    created_time: Option<DateTime<Utc>>,
    updated_time: Option<DateTime<Utc>>,
    time_stamp: DateTime<Utc>,
    #[serde(default)]
    revision: u32,
    status: Option<EventStatus>,
    busy: Option<bool>,
    #[serde(default)]
    custom: CustomProperties,
}

impl TryFrom<EventSnapshot> for Event {
    type Error = Error;

    fn try_from(snapshot: EventSnapshot) -> Result<Self> {
        let texts = [
            ("summary", &snapshot.summary),
            ("description", &snapshot.description),
            ("location", &snapshot.location),
        ];
        for (field, text) in texts.iter() {
            if let Some(text) = text {
                if !is_escaped(text) {
                    return Err(Error::InvalidArgument(format!("{} of event {} is not escaped: {:?}", field, snapshot.id, text)));
                }
            }
        }

        Ok(Self {
            id: snapshot.id,
            start_time: snapshot.start_time,
            end_time: snapshot.end_time,
            summary: snapshot.summary,
            description: snapshot.description,
            location: snapshot.location,
            created_time: snapshot.created_time,
            updated_time: snapshot.updated_time,
            time_stamp: snapshot.time_stamp,
            revision: snapshot.revision,
            status: snapshot.status,
            busy: snapshot.busy,
            custom: snapshot.custom,
        })
    }
}

impl Event {
    /// Create an event, using the system clock for default timestamps and a random UUID if no id is given.
    ///
    /// Fails with [`Error::InvalidArgument`] if no start time is given.
    pub fn new(properties: EventProperties) -> Result<Self> {
        Self::new_with(properties, &SystemClock, &UuidGenerator)
    }

    /// Create an event, using the given clock and identifier generator to fill the defaults
    pub fn new_with(properties: EventProperties, clock: &dyn Clock, ids: &dyn IdGenerator) -> Result<Self> {
        let start_time = properties.start_time
            .ok_or_else(|| Error::InvalidArgument("an event requires a start time".to_string()))?;
        let now = clock.now();
        let id = match properties.id {
            Some(id) => id,
            None => ids.generate_id(),
        };

        Ok(Self {
            id,
            start_time,
            end_time: properties.end_time,
            summary: properties.summary.as_deref().map(escape_text),
            description: properties.description.as_deref().map(escape_text),
            location: properties.location.as_deref().map(escape_text),
            created_time: properties.created_time.unwrap_or(Some(now)),
            updated_time: properties.updated_time.unwrap_or(Some(now)),
            time_stamp: properties.time_stamp.unwrap_or(now),
            revision: properties.revision.unwrap_or(0),
            status: properties.status,
            busy: properties.busy.unwrap_or(Some(true)),
            custom: properties.custom,
        })
    }

    pub fn id(&self) -> &str                                { &self.id }
    pub fn start_time(&self) -> &DateTime<Utc>              { &self.start_time }
    pub fn end_time(&self) -> Option<&DateTime<Utc>>        { self.end_time.as_ref() }
    pub fn summary(&self) -> Option<&str>                   { self.summary.as_deref() }
    pub fn description(&self) -> Option<&str>               { self.description.as_deref() }
    pub fn location(&self) -> Option<&str>                  { self.location.as_deref() }
    pub fn created_time(&self) -> Option<&DateTime<Utc>>    { self.created_time.as_ref() }
    pub fn updated_time(&self) -> Option<&DateTime<Utc>>    { self.updated_time.as_ref() }
    pub fn time_stamp(&self) -> &DateTime<Utc>              { &self.time_stamp }
    pub fn revision(&self) -> u32                           { self.revision }
    pub fn status(&self) -> Option<EventStatus>             { self.status }
    pub fn busy(&self) -> Option<bool>                      { self.busy }
    pub fn custom(&self) -> &CustomProperties               { &self.custom }
    pub fn custom_mut(&mut self) -> &mut CustomProperties   { &mut self.custom }

    pub fn set_start_time(&mut self, start_time: DateTime<Utc>) {
        self.start_time = start_time;
    }

    pub fn set_end_time(&mut self, end_time: Option<DateTime<Utc>>) {
        self.end_time = end_time;
    }

    /// Change the summary. The new text is escaped, just like at creation
    pub fn set_summary(&mut self, summary: Option<&str>) {
        self.summary = summary.map(escape_text);
    }

    /// Change the description. The new text is escaped, just like at creation
    pub fn set_description(&mut self, description: Option<&str>) {
        self.description = description.map(escape_text);
    }

    /// Change the location. The new text is escaped, just like at creation
    pub fn set_location(&mut self, location: Option<&str>) {
        self.location = location.map(escape_text);
    }

    pub fn set_created_time(&mut self, created_time: Option<DateTime<Utc>>) {
        self.created_time = created_time;
    }

    pub fn set_updated_time(&mut self, updated_time: Option<DateTime<Utc>>) {
        self.updated_time = updated_time;
    }

    pub fn set_time_stamp(&mut self, time_stamp: DateTime<Utc>) {
        self.time_stamp = time_stamp;
    }

    pub fn set_revision(&mut self, revision: u32) {
        self.revision = revision;
    }

    pub fn set_status(&mut self, status: Option<EventStatus>) {
        self.status = status;
    }

    pub fn set_busy(&mut self, busy: Option<bool>) {
        self.busy = busy;
    }

    /// Format this event as an iCal `VEVENT` block.
    ///
    /// `scope` is usually the scope of the calendar this event belongs to. See [`crate::ical::build_event`]
    pub fn to_ics(&self, scope: Option<&str>) -> String {
        crate::ical::build_event(self, scope)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FixedClock;

    struct SequentialIds(std::cell::Cell<u32>);
    impl IdGenerator for SequentialIds {
        fn generate_id(&self) -> String {
            let next = self.0.get();
            self.0.set(next + 1);
            format!("event-{}", next)
        }
    }

    fn test_date() -> DateTime<Utc> {
        "2022-08-17T17:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_event_defaults() {
        let now: DateTime<Utc> = "2022-08-01T00:00:00Z".parse().unwrap();
        let ids = SequentialIds(std::cell::Cell::new(7));
        let event = Event::new_with(EventProperties::starting_at(test_date()), &FixedClock(now), &ids).unwrap();

        assert_eq!(event.id(), "event-7");
        assert_eq!(event.start_time(), &test_date());
        assert_eq!(event.end_time(), None);
        assert_eq!(event.summary(), None);
        assert_eq!(event.created_time(), Some(&now));
        assert_eq!(event.updated_time(), Some(&now));
        assert_eq!(event.time_stamp(), &now);
        assert_eq!(event.revision(), 0);
        assert_eq!(event.status(), None);
        assert_eq!(event.busy(), Some(true));
        assert!(event.custom().is_empty());
    }

    #[test]
    fn test_event_requires_a_start_time() {
        let err = Event::new(EventProperties::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_textual_start_time() {
        let err = EventProperties::default().with_start_time_rfc3339("next tuesday").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let props = EventProperties::default().with_start_time_rfc3339("2022-08-18T03:00:00+10:00").unwrap();
        assert_eq!(props.start_time, Some(test_date()));
    }

    #[test]
    fn test_text_is_escaped_once() {
        let mut event = Event::new(EventProperties::starting_at(test_date())
            .with_summary("Jacob's 22nd Birthday Party")
            .with_location("My apartment")
        ).unwrap();
        assert_eq!(event.summary(), Some("Jacob\\'s 22nd Birthday Party"));
        assert_eq!(event.location(), Some("My apartment"));

        event.set_description(Some("Drinks, snacks"));
        assert_eq!(event.description(), Some("Drinks\\, snacks"));
    }

    #[test]
    fn test_explicitly_unset_defaults() {
        let props = EventProperties {
            created_time: Some(None),
            updated_time: Some(None),
            busy: Some(None),
            ..EventProperties::starting_at(test_date())
        };
        let event = Event::new(props).unwrap();
        assert_eq!(event.created_time(), None);
        assert_eq!(event.updated_time(), None);
        assert_eq!(event.busy(), None);
    }
}
