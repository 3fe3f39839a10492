//! Date normalization for usage entries
//!
//! Calendar days are UTC days. A value that cannot be parsed yields `None`;
//! callers treat that as "no date", never as an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::UsageEntry;

/// Offset-free timestamp layouts, read as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a date-like string into an instant
///
/// A bare `YYYY-MM-DD` is midnight UTC of that day.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Normalize a date-like string to its UTC calendar day
pub fn normalize_date(value: &str) -> Option<NaiveDate> {
    parse_instant(value).map(|dt| dt.date_naive())
}

/// Format a calendar day as `YYYY-MM-DD`
pub fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Instant attributed to an entry: `date` when parseable, else `created_at`
pub fn effective_instant(entry: &UsageEntry) -> Option<DateTime<Utc>> {
    entry
        .date
        .as_deref()
        .and_then(parse_instant)
        .or_else(|| entry.created_at.as_deref().and_then(parse_instant))
}

/// Calendar day attributed to an entry
pub fn effective_date(entry: &UsageEntry) -> Option<NaiveDate> {
    effective_instant(entry).map(|dt| dt.date_naive())
}
