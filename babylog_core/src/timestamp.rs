//! Timestamp parsing for raw start/end cells.
//!
//! Exports from the tracking app have used several date layouts over time, so
//! string values are tried against a fixed list of formats in priority order.

use crate::error::TimestampError;
use crate::types::{day_start, RawValue};
use chrono::{NaiveDate, NaiveDateTime};

/// Date-time layouts, tried first to last
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
];

/// Date-only layouts, tried after every date-time layout fails
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m-%d-%Y"];

/// Convert a raw cell into a timestamp.
///
/// Typed values pass through (dates become midnight). Strings have `/` mapped
/// to `-` and `T` mapped to a space before matching.
pub fn parse_timestamp(value: &RawValue) -> Result<NaiveDateTime, TimestampError> {
    match value {
        RawValue::DateTime(dt) => Ok(*dt),
        RawValue::Date(d) => Ok(day_start(*d)),
        RawValue::Text(s) => parse_timestamp_str(s),
        RawValue::Number(n) => Err(TimestampError::Unconvertible(n.to_string())),
        RawValue::Empty => Err(TimestampError::Unconvertible("<empty>".to_string())),
    }
}

/// Parse a string against the accepted layouts
pub fn parse_timestamp_str(raw: &str) -> Result<NaiveDateTime, TimestampError> {
    let normalized = raw.trim().replace('/', "-").replace('T', " ");

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(&normalized, format) {
            return Ok(day_start(d));
        }
    }

    Err(TimestampError::InvalidFormat(raw.to_string()))
}
