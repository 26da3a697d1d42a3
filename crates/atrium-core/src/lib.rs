//! # atrium-core
//!
//! The asset hierarchy engine for Atrium.
//!
//! This crate is the pure core of the system: it turns a rectangular table
//! of spreadsheet rows plus a user-declared column mapping into a list of
//! [`asset::Asset`] records, groups them into a deterministic three-level
//! tree (system → sub-system → floor), and maps tree selections back onto
//! the original raw rows:
//!
//! - **Table model**: [`table::CellValue`], [`table::RawRow`], [`table::Table`]
//! - **Column mapping**: [`mapping::ColumnMapping`], [`mapping::SemanticField`]
//! - **Assets**: [`asset::Asset`] plus the sentinel / unnamed label helpers
//! - **Normalizer**: [`normalize::normalize`]
//! - **Hierarchy**: [`hierarchy::HierarchyNode`], [`hierarchy::build_hierarchy`]
//! - **Selection**: [`select::select_node`], [`select::select_asset`],
//!   [`select::match_raw_rows`], [`select::SelectionState`]
//!
//! Every operation is a synchronous pure function of its inputs: no I/O, no
//! shared state, no failure modes for well-formed input. Absent or blank
//! values degrade to sentinel defaults instead of raising.
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `atrium-ingest` and `atrium-server`.

#![deny(unsafe_code)]

pub mod asset;
pub mod hierarchy;
pub mod mapping;
pub mod normalize;
pub mod select;
pub mod table;

pub use asset::Asset;
pub use hierarchy::{build_hierarchy, HierarchyNode};
pub use mapping::{ColumnMapping, SemanticField};
pub use normalize::normalize;
pub use select::{match_raw_rows, select_asset, select_node, Selection, SelectionState};
pub use table::{CellValue, RawRow, Table};
