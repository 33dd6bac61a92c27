//! Timestamp helpers for record dates
//!
//! Record dates are stored as ISO-8601 strings and kept verbatim once written,
//! so files produced by other tools (naive `YYYY-MM-DDTHH:MM:SS.ffffff`
//! timestamps without an offset) load without being rewritten.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Current time as an RFC 3339 string with microsecond precision.
///
/// The output is fixed-width, so two values produced by this function
/// compare correctly as plain strings.
pub fn now_iso() -> String {
    format_timestamp(Utc::now())
}

/// Format a UTC timestamp the same way [`now_iso`] does
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (with offset) and naive ISO-8601 date-times, the latter
/// interpreted as UTC. Returns `None` for anything else.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
