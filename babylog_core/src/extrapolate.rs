//! Sleep extrapolation for the under-logged early period.
//!
//! Before the cutover date sleep was not recorded, so the time between logged
//! events (and before the first / after the last event of a day) is assumed to
//! be sleep. Gaps no longer than the threshold are treated as rounding noise,
//! and synthesized events keep a buffer away from their real neighbours.
//!
//! Synthesized events are returned separately; logged events are never
//! modified or removed.

use crate::config::ExtrapolationConfig;
use crate::types::{day_end, day_start, truncate_to_minute, SECONDS_PER_MINUTE};
use crate::{Event, EventKind};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use std::collections::BTreeMap;

/// The one-off zero-length birth event
pub fn birth_event(birth: NaiveDateTime) -> Event {
    Event::synthesized(EventKind::Birth, birth, birth)
}

/// Append the birth event to the set
pub fn add_birth_event(mut events: Vec<Event>, birth: NaiveDateTime) -> Vec<Event> {
    events.push(birth_event(birth));
    events
}

/// Group events by their derived date, each group sorted by start
pub fn group_by_day(events: &[Event]) -> BTreeMap<NaiveDate, Vec<&Event>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
    for event in events {
        days.entry(event.date()).or_default().push(event);
    }
    for day in days.values_mut() {
        day.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
    }
    days
}

/// Synthesize sleep events for every day before the cutover date.
///
/// `events` must already be split and have current derived columns.
pub fn extrapolate(events: &[Event], config: &ExtrapolationConfig) -> Vec<Event> {
    let mut synthesized = Vec::new();

    for (date, day) in group_by_day(events)
        .into_iter()
        .filter(|(date, _)| *date < config.cutover_date)
    {
        let before = synthesized.len();
        fill_day(date, &day, config, &mut synthesized);
        tracing::debug!(
            "{}: {} events, {} sleep events synthesized",
            date,
            day.len(),
            synthesized.len() - before
        );
    }

    tracing::info!("Synthesized {} sleep events", synthesized.len());
    synthesized
}

fn fill_day(date: NaiveDate, day: &[&Event], config: &ExtrapolationConfig, out: &mut Vec<Event>) {
    let (Some(first_event), Some(rest)) = (day.first(), day.get(1..)) else {
        return;
    };

    let threshold = config.threshold_minutes;
    let buffer = Duration::minutes(config.buffer_minutes);

    let first = first_event.start;
    let last = day.iter().map(|e| e.end).max().unwrap_or(first_event.end);

    // Nothing to fill before midnight-adjacent starts, or before the birth itself
    let starts_at_midnight = first.hour() == 0 && i64::from(first.minute()) <= threshold;
    if !starts_at_midnight && date != config.birth.date() {
        push_sleep(out, day_start(date), truncate_to_minute(first) - buffer);
    }

    let ends_at_midnight = last.hour() == 23 && i64::from(last.minute()) >= 60 - threshold;
    if !ends_at_midnight {
        let from = (truncate_to_minute(last) + buffer).max(last);
        push_sleep(out, from, day_end(date));
    }

    // Latest end seen so far, so an event nested inside a longer one never
    // opens a gap that the longer one still covers
    let mut covered = first_event.end;
    for next in rest {
        if (next.start - covered).num_seconds() > threshold * SECONDS_PER_MINUTE {
            push_sleep(out, covered + buffer, next.start - buffer);
        }
        covered = covered.max(next.end);
    }
}

fn push_sleep(out: &mut Vec<Event>, start: NaiveDateTime, end: NaiveDateTime) {
    if end <= start {
        tracing::debug!(
            "Skipping degenerate sleep interval {} -> {}",
            start,
            end
        );
        return;
    }
    out.push(Event::synthesized(EventKind::Sleep, start, end));
}
