//! A module to build ICal files

use crate::calendar::Calendar;
use crate::event::Event;
use crate::properties::CustomProperties;
use crate::utils::format_date_time;

use super::ICAL_VERSION;

/// Content lines of an iCal file, in the order they will be written
struct ContentLines {
    lines: Vec<String>,
}

impl ContentLines {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn begin(&mut self, component: &str) {
        self.lines.push(format!("BEGIN:{}", component));
    }

    fn end(&mut self, component: &str) {
        self.lines.push(format!("END:{}", component));
    }

    /// Write `KEY:VALUE`, unless the key or the value is missing or empty
    fn push<V: AsRef<str>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            let value = value.as_ref();
            if key.is_empty() || value.is_empty() {
                return;
            }
            self.lines.push(format!("{}:{}", key, value));
        }
    }

    fn push_custom(&mut self, custom: &CustomProperties) {
        for (name, value) in custom.iter() {
            self.push(name, Some(value));
        }
    }

    fn into_string(self) -> String {
        self.lines.join("\n")
    }
}


/// Create an iCal file (`VCALENDAR`) from a `crate::Calendar` and all its events
pub fn build_calendar(calendar: &Calendar) -> String {
    let mut lines = ContentLines::new();
    lines.begin("VCALENDAR");
    lines.push("PRODID", Some(calendar.product_id()));
    lines.push("VERSION", Some(ICAL_VERSION));
    lines.push("METHOD", Some(calendar.method()));
    lines.push("CALSCALE", Some(calendar.scale()));
    lines.push("X-WR-CALNAME", calendar.name());
    lines.push("X-WR-TIMEZONE", calendar.time_zone());
    lines.push_custom(calendar.custom());

    for event in calendar.events() {
        push_event(&mut lines, event, calendar.scope());
    }

    lines.end("VCALENDAR");
    lines.into_string()
}

/// Create an iCal `VEVENT` block from a `crate::Event`.
///
/// When `scope` is given (and not empty), it is appended to the UID as `<id>@<scope>`
pub fn build_event(event: &Event, scope: Option<&str>) -> String {
    let mut lines = ContentLines::new();
    push_event(&mut lines, event, scope);
    lines.into_string()
}

fn push_event(lines: &mut ContentLines, event: &Event, scope: Option<&str>) {
    let uid = match scope.filter(|s| !s.is_empty()) {
        Some(scope) => format!("{}@{}", event.id(), scope),
        None => event.id().to_string(),
    };
    let transparency = event.busy().map(|busy| if busy { "OPAQUE" } else { "TRANSPARENT" });

    lines.begin("VEVENT");
    lines.push("DTSTART", Some(format_date_time(event.start_time())));
    lines.push("DTEND", event.end_time().map(format_date_time));
    lines.push("DTSTAMP", Some(format_date_time(event.time_stamp())));
    lines.push("UID", Some(uid));
    lines.push("CREATED", event.created_time().map(format_date_time));
    lines.push("DESCRIPTION", event.description());
    lines.push("LAST-MODIFIED", event.updated_time().map(format_date_time));
    lines.push("LOCATION", event.location());
    lines.push("STATUS", event.status().map(|s| s.as_str()));
    lines.push("SUMMARY", event.summary());
    lines.push("TRANSP", transparency);
    lines.push("SEQUENCE", Some(event.revision().to_string()));
    lines.push_custom(event.custom());
    lines.end("VEVENT");
}
