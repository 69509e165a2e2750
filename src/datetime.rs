use chrono::{NaiveDate, NaiveDateTime};

const PLACEHOLDER: &str = "--";

const DATE_DISPLAY_FORMAT: &str = "%b %d, %Y";
const TIME_DISPLAY_FORMAT: &str = "%I:%M %p";

// Wallet app serializes timestamps in a handful of shapes; first match wins.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.3fZ",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_ONLY_FORMAT: &str = "%d/%m/%Y";

/// Normalizes a raw `startTime` value into display (date, time) strings.
///
/// A format miss is never fatal: each candidate format is tried in order,
/// a date-only value renders with no time slot, and anything unparseable
/// passes through verbatim so the user still sees what the app stored.
pub fn parse_start_time(start_time: &str) -> (String, String) {
    if start_time.is_empty() {
        return (PLACEHOLDER.to_string(), PLACEHOLDER.to_string());
    }

    for fmt in DATETIME_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(start_time, fmt) {
            return (
                dt.format(DATE_DISPLAY_FORMAT).to_string(),
                dt.format(TIME_DISPLAY_FORMAT).to_string(),
            );
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(start_time, DATE_ONLY_FORMAT) {
        return (
            date.format(DATE_DISPLAY_FORMAT).to_string(),
            PLACEHOLDER.to_string(),
        );
    }

    (start_time.to_string(), PLACEHOLDER.to_string())
}
