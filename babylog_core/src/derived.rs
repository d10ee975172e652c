//! Derived column computation.
//!
//! `date`, the intra-day offsets and `duration` are functions of `start` and
//! `end` only. They are rebuilt for the whole set after every structural
//! change instead of being patched.

use crate::{Derived, Event};

/// Recompute derived columns for every event, overwriting stale values.
///
/// Order is preserved; running this twice gives the same result as once.
pub fn recompute(events: Vec<Event>, minimum_duration: i64) -> Vec<Event> {
    events
        .into_iter()
        .map(|mut event| {
            event.derived = Derived::compute(event.start, event.end, minimum_duration);
            event
        })
        .collect()
}
