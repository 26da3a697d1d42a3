//! Excel workbook reading via `calamine`.
//!
//! Only the first sheet is read (multi-sheet merging is out of scope).
//! Row 0 is the header row; header cells are stringified, data cells keep
//! their numeric identity so that downstream string-form matching behaves
//! like the values a spreadsheet UI displays.

use std::io::Cursor;

use atrium_core::{CellValue, Table};
use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::errors::{IngestError, Result};

/// Read the first sheet of an Excel workbook from in-memory bytes.
pub fn read_workbook_bytes(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IngestError::NoSheet)?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(IngestError::EmptyTable)?
        .iter()
        .map(header_text)
        .collect();

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Ok(crate::assemble_table(headers, data))
}

/// Stringify a header cell. Blank headers become empty column names, which
/// downstream lookups simply never match.
fn header_text(cell: &Data) -> String {
    convert_cell(cell).text().unwrap_or_default()
}

/// Map a calamine cell onto the core cell model.
///
/// Booleans stringify (`"true"` / `"false"`), date-times keep their serial
/// number form, error cells degrade to empty.
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
