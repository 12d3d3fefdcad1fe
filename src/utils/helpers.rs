//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Offset-carrying formats accepted in addition to RFC 3339
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

/// Offset-free formats, interpreted in the default time zone
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a submitted date-time candidate.
///
/// Values with an explicit offset keep it; naive values are placed in
/// `default_tz`. Returns `None` for anything unparseable, including local
/// times that fall into a DST gap.
pub fn parse_datetime_input(input: &str, default_tz: Tz) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    // A bare `Z` suffix is UTC in ISO 8601 even without seconds
    let with_offset = match input.strip_suffix(['Z', 'z']) {
        Some(local) => format!("{}+00:00", local),
        None => input.to_string(),
    };
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::<FixedOffset>::parse_from_str(&with_offset, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    match default_tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => Some(local.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Format a time slot for display, e.g. `Sun, 01 Jun 2025, 10:00`
pub fn format_time_slot(starts_at: DateTime<Utc>, tz: Tz) -> String {
    starts_at.with_timezone(&tz).format("%a, %d %b %Y, %H:%M").to_string()
}

/// Trim a submitted text field, treating blank input as absent
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
