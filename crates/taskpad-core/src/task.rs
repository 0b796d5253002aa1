use chrono::{DateTime, TimeZone};
use serde::Serialize;

/// Prefix carried by every completed entry.
pub const COMPLETION_MARKER: &str = "✓ ";

pub const TIMESTAMP_FORMAT: &str = "%H:%M";

/// Result of flipping the completion marker on one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    pub entry: String,
    pub completed: bool,
}

/// Read-only breakdown of a display string, used for rendering.
///
/// The stored entry is always the source of truth; nothing is ever
/// re-assembled from these parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskParts<'a> {
    pub completed: bool,
    pub stamp: Option<&'a str>,
    pub text: &'a str,
}

pub fn stamp<Tz>(text: &str, at: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("[{}] {text}", at.format(TIMESTAMP_FORMAT))
}

pub fn is_completed(entry: &str) -> bool {
    entry.starts_with(COMPLETION_MARKER)
}

pub fn mark(entry: &str) -> String {
    format!("{COMPLETION_MARKER}{entry}")
}

/// Drops exactly the first two characters.
pub fn unmark(entry: &str) -> String {
    entry.chars().skip(2).collect()
}

pub fn toggle(entry: &str) -> Toggled {
    if is_completed(entry) {
        Toggled {
            entry: unmark(entry),
            completed: false,
        }
    } else {
        Toggled {
            entry: mark(entry),
            completed: true,
        }
    }
}

pub fn parts(entry: &str) -> TaskParts<'_> {
    let completed = is_completed(entry);
    let rest = entry.strip_prefix(COMPLETION_MARKER).unwrap_or(entry);

    match split_stamp(rest) {
        Some((stamp, text)) => TaskParts {
            completed,
            stamp: Some(stamp),
            text,
        },
        None => TaskParts {
            completed,
            stamp: None,
            text: rest,
        },
    }
}

// "[HH:MM] " with ASCII digits only
fn split_stamp(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 8 || bytes[0] != b'[' || bytes[3] != b':' || bytes[6] != b']' {
        return None;
    }
    if bytes[7] != b' ' {
        return None;
    }
    let digits = [bytes[1], bytes[2], bytes[4], bytes[5]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some((&s[1..6], &s[8..]))
}
