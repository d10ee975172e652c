//! Day-boundary splitting.
//!
//! Every later stage assumes an event sits inside one calendar day, so events
//! that run past midnight are cut at the boundary:
//! `2023-07-01 23:55 → 2023-07-02 00:10` becomes
//! `2023-07-01 23:55:00 → 23:59:59` and `2023-07-02 00:00:00 → 00:10:00`.

use crate::types::{day_end, day_start};
use crate::Event;

/// Replace every multi-day event with single-day pieces.
///
/// Pieces inherit everything but their bounds. Spans longer than two dates
/// get a full-day piece for each date in between.
pub fn split_multi_day(events: Vec<Event>) -> Vec<Event> {
    let mut out = Vec::with_capacity(events.len());
    let mut split = 0usize;

    for event in events {
        let first_day = event.start.date();
        let last_day = event.end.date();
        if first_day >= last_day {
            out.push(event);
            continue;
        }

        split += 1;
        out.push(event.with_bounds(event.start, day_end(first_day)));
        let mut day = first_day.succ_opt();
        while let Some(d) = day.filter(|d| *d < last_day) {
            out.push(event.with_bounds(day_start(d), day_end(d)));
            day = d.succ_opt();
        }
        out.push(event.with_bounds(day_start(last_day), event.end));
    }

    if split > 0 {
        tracing::debug!("Split {} events crossing midnight", split);
    }
    out
}
