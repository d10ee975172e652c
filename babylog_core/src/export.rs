//! Writing the finalized timeline for the renderer.
//!
//! Both outputs are written to a temporary file in the target directory,
//! synced, then renamed over the target, so a reader never sees a partial
//! table.

use crate::aliases::AliasTable;
use crate::types::format_timestamp;
use crate::{Error, Event, Result};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Canonical columns, in output order; auxiliary columns follow, sorted
pub const CORE_COLUMNS: [&str; 8] = [
    "kind",
    "start",
    "end",
    "date",
    "start_offset",
    "end_offset",
    "duration",
    "source",
];

/// Union of auxiliary column names across events
pub fn auxiliary_columns(events: &[Event]) -> BTreeSet<String> {
    events
        .iter()
        .flat_map(|e| e.fields.keys().cloned())
        .collect()
}

/// Write the event table as CSV
pub fn write_timeline_csv(path: &Path, events: &[Event]) -> Result<()> {
    let aux = auxiliary_columns(events);

    write_atomically(path, |file| {
        let mut writer = csv::WriterBuilder::new().from_writer(file);

        let header: Vec<&str> = CORE_COLUMNS
            .iter()
            .copied()
            .chain(aux.iter().map(String::as_str))
            .collect();
        writer.write_record(&header)?;

        for event in events {
            let mut row = vec![
                event.kind.to_string(),
                format_timestamp(event.start),
                format_timestamp(event.end),
                event.derived.date.to_string(),
                event.derived.start_offset.to_string(),
                event.derived.end_offset.to_string(),
                event.derived.duration.to_string(),
                event.source.as_str().to_string(),
            ];
            row.extend(
                aux.iter()
                    .map(|c| event.fields.get(c).cloned().unwrap_or_default()),
            );
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    })?;

    tracing::info!("Wrote {} events to {:?}", events.len(), path);
    Ok(())
}

/// Write the per-kind alias table as pretty JSON
pub fn write_aliases_json(path: &Path, aliases: &AliasTable) -> Result<()> {
    write_atomically(path, |file| {
        serde_json::to_writer_pretty(&mut *file, aliases)?;
        file.write_all(b"\n")?;
        Ok(())
    })?;

    tracing::info!("Wrote aliases for {} kinds to {:?}", aliases.len(), path);
    Ok(())
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut std::fs::File) -> Result<()>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    write(temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::build_alias_table;
    use crate::{EventKind, EventSource};
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn sample() -> Vec<Event> {
        let mut feed = Event::new(
            EventKind::Feed,
            ts("2022-11-10 09:00:00"),
            ts("2022-11-10 09:30:00"),
            EventSource::Logged,
        );
        feed.fields.insert("start condition".into(), "Breast".into());
        let sleep = Event::synthesized(
            EventKind::Sleep,
            ts("2022-11-10 09:35:00"),
            ts("2022-11-10 11:00:00"),
        );
        vec![feed, sleep]
    }

    #[test]
    fn test_timeline_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("timeline.csv");

        write_timeline_csv(&path, &sample()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(
            headers,
            vec![
                "kind",
                "start",
                "end",
                "date",
                "start_offset",
                "end_offset",
                "duration",
                "source",
                "notes",
                "start condition"
            ]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "feed");
        assert_eq!(&rows[0][1], "2022-11-10 09:00:00");
        assert_eq!(&rows[0][3], "2022-11-10");
        assert_eq!(&rows[0][4], "32400");
        assert_eq!(&rows[0][6], "1800");
        assert_eq!(&rows[0][7], "logged");
        assert_eq!(&rows[0][8], "");
        assert_eq!(&rows[0][9], "Breast");
        assert_eq!(&rows[1][7], "synthesized");
        assert_eq!(&rows[1][8], "extrapolation");
    }

    #[test]
    fn test_rewrite_replaces_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.csv");

        write_timeline_csv(&path, &sample()).unwrap();
        write_timeline_csv(&path, &sample()[..1]).unwrap();

        let reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.into_records().count(), 1);
    }

    #[test]
    fn test_aliases_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.json");
        let columns: BTreeSet<String> = ["start condition".to_string()].into_iter().collect();
        let table = build_alias_table([EventKind::Feed, EventKind::Bath], &columns).unwrap();

        write_aliases_json(&path, &table).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["feed"]["start condition"], "feed type");
        assert_eq!(value["bath"]["start condition"], "start condition");
    }
}
