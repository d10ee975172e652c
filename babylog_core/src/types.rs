//! Core domain types for babylog.
//!
//! This module defines the fundamental types used throughout the pipeline:
//! - Raw records as loaded from the tabular export
//! - Canonical events and their derived columns
//! - Timestamp helpers shared by the splitter and extrapolator

use crate::EventKind;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Floor applied to zero-length events when nothing else is configured
pub const DEFAULT_MINIMUM_DURATION_SECS: i64 = 5 * SECONDS_PER_MINUTE;

/// Annotation carried by every synthesized event
pub const SYNTHESIZED_NOTE: &str = "extrapolation";

// ============================================================================
// Raw Input
// ============================================================================

/// A single cell of a raw record
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl RawValue {
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the value as free text for auxiliary columns
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Empty => None,
            RawValue::Text(s) if s.trim().is_empty() => None,
            RawValue::Text(s) => Some(s.trim().to_string()),
            RawValue::Number(n) => Some(n.to_string()),
            RawValue::Date(d) => Some(d.to_string()),
            RawValue::DateTime(dt) => Some(format_timestamp(*dt)),
        }
    }
}

/// One row of the raw log, keyed by its original column header
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRecord {
    pub values: BTreeMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mainly for callers assembling records in code
    pub fn with(mut self, column: impl Into<String>, value: RawValue) -> Self {
        self.values.insert(column.into(), value);
        self
    }

    pub fn with_text(self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(column, RawValue::Text(value.into()))
    }
}

// ============================================================================
// Canonical Events
// ============================================================================

/// Whether an event came from the log or was inferred
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    Logged,
    Synthesized,
}

impl EventSource {
    pub fn as_str(self) -> &'static str {
        match self {
            EventSource::Logged => "logged",
            EventSource::Synthesized => "synthesized",
        }
    }
}

/// Columns derived from an event's start and end.
///
/// Never authoritative: `recompute` rebuilds these from the timestamps.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Derived {
    pub date: NaiveDate,
    pub start_offset: i64,
    pub end_offset: i64,
    pub duration: i64,
}

impl Derived {
    /// Compute the derived columns for a `[start, end]` interval.
    ///
    /// Offsets are measured from midnight of `start`'s day, for both ends.
    /// A zero-length interval reports `minimum_duration` instead of zero.
    pub fn compute(start: NaiveDateTime, end: NaiveDateTime, minimum_duration: i64) -> Self {
        let midnight = day_start(start.date());
        let raw = (end - start).num_seconds();
        Self {
            date: start.date(),
            start_offset: (start - midnight).num_seconds(),
            end_offset: (end - midnight).num_seconds(),
            duration: if raw == 0 { minimum_duration } else { raw },
        }
    }
}

/// A canonical care event
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub source: EventSource,
    /// Auxiliary columns (case-folded name → text), carried through uninterpreted
    pub fields: BTreeMap<String, String>,
    pub derived: Derived,
}

impl Event {
    /// Create an event with no auxiliary fields
    pub fn new(kind: EventKind, start: NaiveDateTime, end: NaiveDateTime, source: EventSource) -> Self {
        Self {
            kind,
            start,
            end,
            source,
            fields: BTreeMap::new(),
            derived: Derived::compute(start, end, DEFAULT_MINIMUM_DURATION_SECS),
        }
    }

    /// An inferred event, annotated as such and carrying no raw auxiliary data
    pub fn synthesized(kind: EventKind, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let mut event = Self::new(kind, start, end, EventSource::Synthesized);
        event
            .fields
            .insert("notes".to_string(), SYNTHESIZED_NOTE.to_string());
        event
    }

    /// Copy of this event with new bounds; derived columns are left for `recompute`
    pub fn with_bounds(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }

    pub fn is_synthesized(&self) -> bool {
        self.source == EventSource::Synthesized
    }

    pub fn date(&self) -> NaiveDate {
        self.derived.date
    }

    pub fn duration(&self) -> i64 {
        self.derived.duration
    }

    pub fn overlaps(&self, other: &Event) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// ============================================================================
// Timestamp Helpers
// ============================================================================

/// 00:00:00 of the given date
pub fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59:59 of the given date
pub fn day_end(date: NaiveDate) -> NaiveDateTime {
    day_start(date) + Duration::seconds(SECONDS_PER_DAY - 1)
}

/// Drop seconds and sub-seconds
pub fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    let minutes = i64::from(ts.num_seconds_from_midnight()) / SECONDS_PER_MINUTE;
    day_start(ts.date()) + Duration::minutes(minutes)
}

/// Canonical textual form used in exported tables
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
