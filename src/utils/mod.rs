//! Some utility functions

use chrono::{DateTime, Utc};

/// Escape a text value so that it can be written in an iCal content line.
///
/// Commas, newlines, single quotes and double quotes are prefixed with a backslash
/// (a newline becomes the two characters `\n`).
pub fn escape_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Tells whether `text` can be the output of [`escape_text`]:
/// it has no raw newline, and every comma or quote is preceded by a backslash
pub fn is_escaped(text: &str) -> bool {
    let mut previous = None;
    for c in text.chars() {
        match c {
            '\n' => return false,
            ',' | '\'' | '"' if previous != Some('\\') => return false,
            _ => (),
        }
        previous = Some(c);
    }
    true
}

/// Format a timestamp as an iCal UTC date-time, e.g. `20220817T170000Z`.
///
/// Sub-second precision is dropped, and so is the sign chrono writes for years past 9999.
pub fn format_date_time(dt: &DateTime<Utc>) -> String {
    let mut formatted: String = dt.format("%Y%m%dT%H%M%S").to_string()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    formatted.push('Z');
    formatted
}

/// Generate a random identifier for a calendar component
pub fn random_id() -> String {
    uuid::Uuid::new_v4().to_hyphenated().to_string()
}
