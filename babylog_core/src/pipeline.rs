//! End-to-end processing of a raw log into a renderer-ready timeline.
//!
//! Stage order:
//!
//! 1. **Validate** the alias table against the exclusion list
//! 2. **Normalize** raw records into events
//! 3. **Split** events crossing midnight, then recompute derived columns
//! 4. **Birth**: append the birth event, recompute
//! 5. **Extrapolate** sleep for days before the cutover, append, recompute
//! 6. **Sort** by start

use crate::aliases::{self, AliasTable};
use crate::derived::recompute;
use crate::extrapolate::{add_birth_event, extrapolate};
use crate::normalize::normalize;
use crate::split::split_multi_day;
use crate::{Config, Error, Event, RawRecord, Result};

/// Finalized event table plus display metadata
#[derive(Clone, Debug)]
pub struct Timeline {
    /// Every event, sorted by start
    pub events: Vec<Event>,
    /// Per-kind column display names
    pub aliases: AliasTable,
    /// How many events were synthesized (birth included)
    pub synthesized: usize,
}

/// Run the whole pipeline over a batch of raw records
pub fn build_timeline(records: &[RawRecord], config: &Config) -> Result<Timeline> {
    let errors = aliases::validate(&config.normalize.excluded_kinds);
    if !errors.is_empty() {
        return Err(Error::AliasCoverage(errors.join("; ")));
    }

    let minimum_duration = config.derived.minimum_duration_secs;

    let normalized = normalize(records, &config.normalize)?;
    let logged = normalized.events.len();

    let events = recompute(split_multi_day(normalized.events), minimum_duration);
    tracing::debug!("{} events after day-boundary split", events.len());

    let mut events = recompute(
        add_birth_event(events, config.extrapolation.birth),
        minimum_duration,
    );

    let synthesized = extrapolate(&events, &config.extrapolation);
    events.extend(synthesized);
    let mut events = recompute(events, minimum_duration);

    sort_events(&mut events);

    let synthesized = events.iter().filter(|e| e.is_synthesized()).count();
    tracing::info!(
        "Timeline ready: {} events ({} logged, {} synthesized)",
        events.len(),
        logged,
        synthesized
    );

    Ok(Timeline {
        events,
        aliases: normalized.aliases,
        synthesized,
    })
}

/// Stable chronological order with a fixed tie-break
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.end.cmp(&b.end))
            .then(a.kind.cmp(&b.kind))
            .then(a.source.cmp(&b.source))
    });
}
