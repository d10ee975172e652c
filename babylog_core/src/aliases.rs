//! Per-kind display names for auxiliary columns.
//!
//! The raw export reuses generic columns ("start condition", "end condition",
//! ...) for different purposes depending on the kind of event. This module
//! holds the static relabeling table and builds the lookup the renderer uses
//! for legends and tooltips.

use crate::{Error, EventKind, Result};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Column name → display name, for one kind
pub type ColumnAliases = BTreeMap<String, String>;

/// Display names for every kind present in a timeline
pub type AliasTable = BTreeMap<EventKind, ColumnAliases>;

/// Cached override table - built once and reused across all runs
static OVERRIDES: Lazy<HashMap<EventKind, Vec<(&'static str, &'static str)>>> =
    Lazy::new(build_overrides);

fn build_overrides() -> HashMap<EventKind, Vec<(&'static str, &'static str)>> {
    let mut overrides = HashMap::new();

    overrides.insert(
        EventKind::Diaper,
        vec![
            ("legacy_duration", "color"),
            ("start condition", "consistency"),
            ("start location", "issues"),
            ("end condition", "diaper contents"),
        ],
    );
    overrides.insert(
        EventKind::Feed,
        vec![
            ("start condition", "feed type"),
            ("start location", "delivery"),
            ("end condition", "amount"),
        ],
    );
    overrides.insert(
        EventKind::Meds,
        vec![("start condition", "amount"), ("start location", "name")],
    );
    overrides.insert(EventKind::Pump, vec![("start condition", "amount")]);
    overrides.insert(EventKind::Sleep, vec![("start location", "location")]);
    overrides.insert(
        EventKind::Solids,
        vec![("start condition", "solids consumed"), ("end condition", "opinion")],
    );

    for kind in [
        EventKind::Bath,
        EventKind::BrushTeeth,
        EventKind::IndoorPlay,
        EventKind::OutdoorPlay,
        EventKind::SkinToSkin,
        EventKind::TummyTime,
        EventKind::Birth,
    ] {
        overrides.insert(kind, Vec::new());
    }

    overrides
}

/// Check that every kind that can survive the exclusion filter has an entry.
///
/// Returns a list of problems; empty means the table is usable.
pub fn validate(excluded_kinds: &[String]) -> Vec<String> {
    validate_table(&OVERRIDES, excluded_kinds)
}

fn validate_table(
    table: &HashMap<EventKind, Vec<(&'static str, &'static str)>>,
    excluded_kinds: &[String],
) -> Vec<String> {
    let excluded: BTreeSet<String> = excluded_kinds
        .iter()
        .map(|k| k.trim().to_lowercase())
        .collect();

    let mut errors = Vec::new();
    for kind in EventKind::ALL {
        if excluded.contains(kind.label()) {
            continue;
        }
        match table.get(&kind) {
            None => errors.push(format!("No column aliases defined for kind '{}'", kind)),
            Some(pairs) => {
                let mut seen = BTreeSet::new();
                for (column, _) in pairs {
                    if !seen.insert(*column) {
                        errors.push(format!(
                            "Column '{}' aliased twice for kind '{}'",
                            column, kind
                        ));
                    }
                }
            }
        }
    }
    errors
}

/// Display names for one kind over the given columns.
///
/// Every column maps to itself unless the kind overrides it.
pub fn aliases_for(kind: EventKind, columns: &BTreeSet<String>) -> Result<ColumnAliases> {
    let overrides = OVERRIDES.get(&kind).ok_or_else(|| {
        Error::AliasCoverage(format!("No column aliases defined for kind '{}'", kind))
    })?;

    let mut aliases: ColumnAliases = columns.iter().map(|c| (c.clone(), c.clone())).collect();
    for (column, label) in overrides {
        aliases.insert((*column).to_string(), (*label).to_string());
    }
    Ok(aliases)
}

/// Build the lookup for every kind in `kinds`
pub fn build_alias_table(
    kinds: impl IntoIterator<Item = EventKind>,
    columns: &BTreeSet<String>,
) -> Result<AliasTable> {
    let mut table = AliasTable::new();
    for kind in kinds {
        if !table.contains_key(&kind) {
            table.insert(kind, aliases_for(kind, columns)?);
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> BTreeSet<String> {
        ["type", "start", "end", "legacy_duration", "start condition", "notes"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_default_table_validates() {
        let errors = validate(&["pump".to_string()]);
        assert!(errors.is_empty(), "Alias table has errors: {:?}", errors);
        assert!(validate(&[]).is_empty());
    }

    #[test]
    fn test_missing_kind_is_reported() {
        let mut table = build_overrides();
        table.remove(&EventKind::Feed);
        let errors = validate_table(&table, &[]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("feed"));

        // An excluded kind does not need an entry
        assert!(validate_table(&table, &["Feed".to_string()]).is_empty());
    }

    #[test]
    fn test_diaper_overrides_apply() {
        let aliases = aliases_for(EventKind::Diaper, &columns()).unwrap();
        assert_eq!(aliases["legacy_duration"], "color");
        assert_eq!(aliases["start condition"], "consistency");
        assert_eq!(aliases["notes"], "notes");
        assert_eq!(aliases["start"], "start");
    }

    #[test]
    fn test_kind_without_overrides_is_identity() {
        let aliases = aliases_for(EventKind::Bath, &columns()).unwrap();
        assert!(aliases.iter().all(|(k, v)| k == v));
        assert_eq!(aliases.len(), columns().len());
    }

    #[test]
    fn test_table_keyed_by_kind() {
        let table = build_alias_table(
            [EventKind::Sleep, EventKind::Feed, EventKind::Sleep],
            &columns(),
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[&EventKind::Sleep]["start location"], "location");
        assert_eq!(table[&EventKind::Feed]["start condition"], "feed type");
    }
}
