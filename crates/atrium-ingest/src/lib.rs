//! # atrium-ingest
//!
//! Spreadsheet ingestion for Atrium: bytes or files in, a rectangular
//! [`Table`] out.
//!
//! - **xlsx / xls**: [`xlsx::read_workbook_bytes`] (first sheet only)
//! - **csv**: [`delimited::read_csv_bytes`] (cells stay text; CSV is untyped)
//! - **dispatch**: [`read_table_bytes`] / [`read_table_path`] pick the
//!   reader by [`WorkbookFormat`]
//!
//! The first source row is the header row; all subsequent rows are data.
//! Column and row order are preserved exactly as encountered, because
//! downstream numbering and sort tie-breaks depend on encounter order.
//! Fully blank rows are skipped. Errors never leak partial tables.

#![deny(unsafe_code)]

pub mod delimited;
pub mod errors;
pub mod xlsx;

use std::fmt;
use std::path::Path;

use atrium_core::{CellValue, RawRow, Table};
use tracing::debug;

pub use errors::{IngestError, Result};

/// Supported spreadsheet formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Excel workbooks (`.xlsx`, `.xls`, `.xlsb`, `.ods`).
    Xlsx,
    /// Comma-separated values.
    Csv,
}

impl WorkbookFormat {
    /// Infer the format from a file name or path extension.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xls" | "xlsb" | "ods" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for WorkbookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xlsx => write!(f, "xlsx"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Read a table from in-memory spreadsheet bytes.
pub fn read_table_bytes(bytes: &[u8], format: WorkbookFormat) -> Result<Table> {
    let table = match format {
        WorkbookFormat::Xlsx => xlsx::read_workbook_bytes(bytes)?,
        WorkbookFormat::Csv => delimited::read_csv_bytes(bytes)?,
    };
    debug!(columns = table.columns.len(), rows = table.row_count(), ?format, "ingested table");
    Ok(table)
}

/// Read a table from a file on disk, inferring the format from the
/// extension.
pub fn read_table_path(path: &Path) -> Result<Table> {
    let name = path.to_string_lossy();
    let format = WorkbookFormat::from_name(&name).ok_or_else(|| {
        IngestError::UnsupportedFormat(
            path.extension()
                .map_or_else(|| "(none)".to_owned(), |e| e.to_string_lossy().into_owned()),
        )
    })?;
    let bytes = std::fs::read(path)?;
    read_table_bytes(&bytes, format)
}

/// Assemble a [`Table`] from a header row and data rows of cells.
///
/// Every data row gets an entry for every header (absent cells become
/// [`CellValue::Empty`]); a repeated header keeps the last column's value.
/// Fully blank rows are dropped.
pub(crate) fn assemble_table(headers: Vec<String>, data: Vec<Vec<CellValue>>) -> Table {
    let rows: Vec<RawRow> = data
        .into_iter()
        .filter(|cells| cells.iter().any(|cell| !cell.is_blank()))
        .map(|cells| {
            let mut row = RawRow::new();
            for (index, header) in headers.iter().enumerate() {
                let cell = cells.get(index).cloned().unwrap_or(CellValue::Empty);
                row.insert(header.clone(), cell);
            }
            row
        })
        .collect();
    Table::new(headers, rows)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
