//! Raw record loading from the tracking app's CSV export.
//!
//! The loader does no interpretation beyond splitting cells: headers are kept
//! as written and every cell becomes a text or empty value. Normalization
//! happens later, in one place.

use crate::{RawRecord, RawValue, Result};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;

/// Load every row of a CSV export
pub fn load_raw_records(path: &Path) -> Result<Vec<RawRecord>> {
    let reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let records = read_records(reader)?;
    tracing::info!("Loaded {} raw records from {:?}", records.len(), path);
    Ok(records)
}

/// Load rows from any reader
pub fn load_raw_records_from<R: Read>(input: R) -> Result<Vec<RawRecord>> {
    let reader = ReaderBuilder::new().has_headers(true).from_reader(input);
    read_records(reader)
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawRecord>> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = RawRecord::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            let value = if cell.trim().is_empty() {
                RawValue::Empty
            } else {
                RawValue::Text(cell.trim().to_string())
            };
            record.values.insert(header.clone(), value);
        }
        records.push(record);
    }

    Ok(records)
}
