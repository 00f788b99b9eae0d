//! Property values shared by calendars and events

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::{MapAccess, Visitor};

use crate::error::Error;


/// The status of an event (iCal `STATUS`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Tentative,
    Confirmed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Tentative => "TENTATIVE",
            EventStatus::Confirmed => "CONFIRMED",
            EventStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TENTATIVE" => Ok(EventStatus::Tentative),
            "CONFIRMED" => Ok(EventStatus::Confirmed),
            "CANCELLED" => Ok(EventStatus::Cancelled),
            other => Err(Error::InvalidArgument(format!("{:?} is not a valid event status", other))),
        }
    }
}



/// Non-standard properties (e.g. `X-MY-PROPERTY`), written verbatim after the standard ones.
///
/// Insertion order is preserved. It is highly recommended to prefix their names with `X-`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomProperties {
    entries: Vec<(String, String)>,
}

impl CustomProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property.
    /// If it already exists, its value is replaced but it keeps its position.
    pub fn insert<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> std::iter::FromIterator<(N, V)> for CustomProperties {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (name, value) in iter {
            props.insert(name, value);
        }
        props
    }
}

/// Used to support serde: properties are (de)serialized as a map, keeping the document order
impl Serialize for CustomProperties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

struct CustomPropertiesVisitor;

impl<'de> Visitor<'de> for CustomPropertiesVisitor {
    type Value = CustomProperties;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "a map of property names to string values")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut props = CustomProperties::new();
        while let Some((name, value)) = access.next_entry::<String, String>()? {
            props.insert(name, value);
        }
        Ok(props)
    }
}

/// Used to support serde
impl<'de> Deserialize<'de> for CustomProperties {
    fn deserialize<D>(deserializer: D) -> Result<CustomProperties, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CustomPropertiesVisitor)
    }
}
