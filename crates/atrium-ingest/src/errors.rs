//! Ingestion error types.
//!
//! Everything here surfaces to the user as a single "could not process
//! file" condition; the core engine is never invoked with a partial or
//! corrupt row set.

use thiserror::Error;

/// Errors that can occur while turning spreadsheet bytes into a table.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The workbook could not be opened or read.
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),
    /// The CSV stream could not be parsed.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    /// Underlying I/O failure.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    /// The workbook has no sheets.
    #[error("the workbook contains no sheets")]
    NoSheet,
    /// The source has no header row.
    #[error("the spreadsheet has no header row")]
    EmptyTable,
    /// The file extension is not a supported spreadsheet format.
    #[error("unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
