//! The rectangular table handed to the core by the ingestion layer.
//!
//! - [`CellValue`]: a single spreadsheet cell (text, number, or empty)
//! - [`RawRow`]: one data row as an insertion-ordered column→cell map
//! - [`Table`]: ordered column names plus ordered rows
//!
//! Row identity is positional (row index), never content. Column and row
//! order must be preserved exactly as encountered in the source file, since
//! unnamed-asset numbering and sort tie-breaks depend on encounter order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// CellValue
// ─────────────────────────────────────────────────────────────────────────────

/// A single cell value.
///
/// Serializes untagged: text as a JSON string, numbers as JSON numbers,
/// empty cells as `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A textual cell.
    Text(String),
    /// A numeric cell.
    Number(f64),
    /// An absent or empty cell.
    Empty,
}

impl CellValue {
    /// Whether this cell is empty or whitespace-only text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(t) => t.trim().is_empty(),
            Self::Number(_) => false,
            Self::Empty => true,
        }
    }

    /// Trimmed string form of the cell, or `None` when the cell is empty.
    ///
    /// Numbers render the way a spreadsheet UI displays them: integral
    /// floats drop the fraction (`2.0` → `"2"`), everything else uses the
    /// shortest decimal form. Matching elsewhere compares these string
    /// forms, so the rendering must stay stable.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Text(t) => Some(t.trim().to_owned()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Empty => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Display-form number formatting; integral values below 2^53 print as
/// integers.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RawRow
// ─────────────────────────────────────────────────────────────────────────────

/// One spreadsheet data row: an insertion-ordered map from column name to
/// cell value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: IndexMap<String, CellValue>,
}

impl RawRow {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell. A repeated column name overwrites the earlier value
    /// (last column wins).
    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        let _ = self.cells.insert(column.into(), value);
    }

    /// Look up a cell by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Trimmed string form of the cell in `column`, or `None` when the
    /// column is absent or the cell is empty.
    #[must_use]
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(CellValue::text)
    }

    /// Number of cells in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate cells in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, CellValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Table
// ─────────────────────────────────────────────────────────────────────────────

/// A rectangular table: ordered column names plus ordered data rows.
///
/// The ingestion layer treats the first source row as the header row; all
/// subsequent rows are data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// Data rows in source order.
    pub rows: Vec<RawRow>,
}

impl Table {
    /// Create a table from columns and rows.
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { columns, rows }
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
