//! Chart-facing views of a finalized timeline.
//!
//! These are the small calculations a calendar chart needs around the event
//! table: the window of dates to show, the hour range the bars occupy, tick
//! labels, and per-day totals.

use crate::types::SECONDS_PER_HOUR;
use crate::{Event, EventKind};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Keep events with `from <= start < to`; a missing bound is open
pub fn filter_date_range(
    events: &[Event],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Event> {
    events
        .iter()
        .filter(|e| from.map_or(true, |f| e.start.date() >= f))
        .filter(|e| to.map_or(true, |t| e.start.date() < t))
        .cloned()
        .collect()
}

/// Smallest and largest hour of day touched by any event.
///
/// Falls back to the full day when there is nothing to bound.
pub fn hour_bounds(events: &[Event]) -> (u32, u32) {
    let hours = events
        .iter()
        .flat_map(|e| [e.derived.start_offset, e.derived.end_offset])
        .map(|offset| (offset / SECONDS_PER_HOUR).clamp(0, 23) as u32);

    let (min, max) = hours.fold((24, 0), |(lo, hi), h| (lo.min(h), hi.max(h)));
    if max <= min {
        (0, 24)
    } else {
        (min, max)
    }
}

/// Offsets (seconds since midnight) of every whole hour from `min` through `max`
pub fn hour_ticks((min, max): (u32, u32)) -> Vec<i64> {
    (min..=max)
        .map(|h| i64::from(h) * SECONDS_PER_HOUR)
        .collect()
}

/// `HH:MM` label for an offset in seconds since midnight.
///
/// The end of the day renders as `24:00`.
pub fn format_time_of_day(seconds: i64) -> String {
    format!("{:02}:{:02}", seconds / SECONDS_PER_HOUR, (seconds % SECONDS_PER_HOUR) / 60)
}

/// Sum of durations per day and kind
pub fn daily_totals(events: &[Event]) -> BTreeMap<NaiveDate, BTreeMap<EventKind, i64>> {
    let mut totals: BTreeMap<NaiveDate, BTreeMap<EventKind, i64>> = BTreeMap::new();
    for event in events {
        *totals
            .entry(event.date())
            .or_default()
            .entry(event.kind)
            .or_default() += event.duration();
    }
    totals
}

/// `h:mm` rendering of a duration in seconds
pub fn format_duration(seconds: i64) -> String {
    format!("{}:{:02}", seconds / SECONDS_PER_HOUR, (seconds % SECONDS_PER_HOUR) / 60)
}
