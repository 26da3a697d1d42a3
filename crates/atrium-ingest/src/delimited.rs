//! CSV reading.
//!
//! CSV is untyped, so cells stay text; no numeric sniffing. Silent
//! coercion would make the same value match differently depending on
//! whether it arrived via xlsx or csv.

use atrium_core::{CellValue, Table};
use csv::ReaderBuilder;

use crate::errors::{IngestError, Result};

/// Read a table from CSV bytes. Row 0 is the header row.
pub fn read_csv_bytes(bytes: &[u8]) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();
    let headers: Vec<String> = records
        .next()
        .ok_or(IngestError::EmptyTable)??
        .iter()
        .map(str::to_owned)
        .collect();

    let mut data: Vec<Vec<CellValue>> = Vec::new();
    for record in records {
        let record = record?;
        data.push(record.iter().map(convert_field).collect());
    }

    Ok(crate::assemble_table(headers, data))
}

fn convert_field(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_owned())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
