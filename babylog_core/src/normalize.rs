//! Raw record normalization.
//!
//! Turns rows with inconsistent column casing and several timestamp layouts
//! into canonical [`Event`]s, and builds the per-kind column alias table.

use crate::aliases::{build_alias_table, AliasTable};
use crate::config::NormalizeConfig;
use crate::timestamp::parse_timestamp;
use crate::{Error, Event, EventKind, EventSource, RawRecord, RawValue, Result};
use chrono::Duration;
use std::collections::{BTreeMap, BTreeSet};

/// Column holding the kind label; `kind` is accepted as a synonym
const KIND_COLUMNS: [&str; 2] = ["type", "kind"];
const START_COLUMN: &str = "start";
const END_COLUMN: &str = "end";
/// The export's "Duration" column means different things per kind
const LEGACY_DURATION_COLUMN: &str = "legacy_duration";

/// Output of the normalizer
#[derive(Clone, Debug)]
pub struct Normalized {
    pub events: Vec<Event>,
    pub aliases: AliasTable,
}

/// Case-fold a column header, renaming the legacy duration column
pub fn fold_column(name: &str) -> String {
    let folded = name.trim().to_lowercase();
    if folded == "duration" {
        LEGACY_DURATION_COLUMN.to_string()
    } else {
        folded
    }
}

/// Normalize a batch of raw records.
///
/// Records are numbered from 1 in error messages, matching data rows of the
/// export.
pub fn normalize(records: &[RawRecord], config: &NormalizeConfig) -> Result<Normalized> {
    let excluded: BTreeSet<String> = config
        .excluded_kinds
        .iter()
        .map(|k| k.trim().to_lowercase())
        .collect();
    let missing_end = Duration::seconds(config.min_event_duration_secs);

    let mut events = Vec::with_capacity(records.len());
    let mut columns = BTreeSet::new();
    let mut dropped = 0usize;

    for (idx, raw) in records.iter().enumerate() {
        let record = idx + 1;
        let folded: BTreeMap<String, &RawValue> = raw
            .values
            .iter()
            .map(|(name, value)| (fold_column(name), value))
            .collect();
        columns.extend(folded.keys().cloned());

        let label = KIND_COLUMNS
            .iter()
            .find_map(|c| folded.get(*c).and_then(|v| v.as_text()))
            .ok_or_else(|| Error::MissingField {
                record,
                field: KIND_COLUMNS[0].to_string(),
            })?
            .to_lowercase();

        if excluded.contains(&label) {
            dropped += 1;
            continue;
        }

        let kind: EventKind = label.parse().map_err(|_| Error::UnknownKind {
            record,
            label: label.clone(),
        })?;

        let start_value = folded
            .get(START_COLUMN)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::MissingField {
                record,
                field: START_COLUMN.to_string(),
            })?;
        let start = parse_timestamp(start_value).map_err(|source| Error::Timestamp {
            record,
            column: START_COLUMN.to_string(),
            source,
        })?;

        let end = match folded.get(END_COLUMN).filter(|v| !v.is_empty()) {
            Some(value) => parse_timestamp(value).map_err(|source| Error::Timestamp {
                record,
                column: END_COLUMN.to_string(),
                source,
            })?,
            None => start + missing_end,
        };

        if end < start {
            return Err(Error::InvalidInterval { record, start, end });
        }

        let mut event = Event::new(kind, start, end, EventSource::Logged);
        for (name, value) in &folded {
            if is_core_column(name) {
                continue;
            }
            if let Some(text) = value.as_text() {
                event.fields.insert(name.clone(), text);
            }
        }
        events.push(event);
    }

    if dropped > 0 {
        tracing::debug!("Dropped {} records of excluded kinds", dropped);
    }

    let aliases = build_alias_table(events.iter().map(|e| e.kind), &columns)?;

    tracing::info!(
        "Normalized {} events ({} kinds) from {} records",
        events.len(),
        aliases.len(),
        records.len()
    );

    Ok(Normalized { events, aliases })
}

fn is_core_column(name: &str) -> bool {
    KIND_COLUMNS.contains(&name) || name == START_COLUMN || name == END_COLUMN
}
