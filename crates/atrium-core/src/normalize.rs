//! The asset normalizer: raw rows + column mapping → asset records.
//!
//! Resolution rules:
//! - An unmapped field, missing column, or blank cell resolves to the empty
//!   string; values are trimmed.
//! - Blank grouping fields default to the "Uncategorized …" sentinels.
//! - A blank name becomes `Unnamed Asset #k`, where `k` counts from 1
//!   independently per distinct `(system, sub_system, floor)` triple in
//!   row-encounter order. The counters are recomputed from scratch on every
//!   call; numbering depends only on the current row order.
//!
//! There is no failure mode: malformed mappings simply produce defaults.

use std::collections::HashMap;

use tracing::debug;

use crate::asset::{
    Asset, UNCATEGORIZED_FLOOR, UNCATEGORIZED_SUB_SYSTEM, UNCATEGORIZED_SYSTEM,
    UNNAMED_ASSET_PREFIX,
};
use crate::mapping::{ColumnMapping, SemanticField};
use crate::table::RawRow;

/// Convert raw rows into normalized assets under `mapping`.
///
/// Every returned asset has non-empty `name`, `system`, `sub_system`, and
/// `floor`. Output order matches row order.
#[must_use]
pub fn normalize(rows: &[RawRow], mapping: &ColumnMapping) -> Vec<Asset> {
    let mut unnamed_counts: HashMap<(String, String, String), usize> = HashMap::new();

    let assets: Vec<Asset> = rows
        .iter()
        .map(|row| {
            let system = resolve_or(row, mapping, SemanticField::System, UNCATEGORIZED_SYSTEM);
            let sub_system =
                resolve_or(row, mapping, SemanticField::SubSystem, UNCATEGORIZED_SUB_SYSTEM);
            let floor = resolve_or(row, mapping, SemanticField::Floor, UNCATEGORIZED_FLOOR);

            let name = {
                let raw = resolve(row, mapping, SemanticField::Name);
                if raw.is_empty() {
                    let counter = unnamed_counts
                        .entry((system.clone(), sub_system.clone(), floor.clone()))
                        .or_insert(0);
                    *counter += 1;
                    format!("{UNNAMED_ASSET_PREFIX} #{counter}")
                } else {
                    raw
                }
            };

            let asset_id = {
                let raw = resolve(row, mapping, SemanticField::AssetId);
                if raw.is_empty() { None } else { Some(raw) }
            };

            Asset {
                asset_id,
                name,
                system,
                sub_system,
                floor,
                ..Asset::default()
            }
        })
        .collect();

    debug!(rows = rows.len(), assets = assets.len(), "normalized assets");
    assets
}

/// Trimmed value of the mapped column for `field`, or the empty string.
fn resolve(row: &RawRow, mapping: &ColumnMapping, field: SemanticField) -> String {
    mapping
        .column(field)
        .and_then(|column| row.text(column))
        .unwrap_or_default()
}

/// Like [`resolve`], but substituting `fallback` for a blank result.
fn resolve_or(row: &RawRow, mapping: &ColumnMapping, field: SemanticField, fallback: &str) -> String {
    let value = resolve(row, mapping, field);
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;

    fn row(pairs: &[(&str, CellValue)]) -> RawRow {
        pairs
            .iter()
            .map(|(c, v)| ((*c).to_owned(), v.clone()))
            .collect()
    }

    fn full_mapping() -> ColumnMapping {
        ColumnMapping {
            system: "Sys".into(),
            sub_system: "Sub".into(),
            floor: "Floor".into(),
            name: "Name".into(),
            asset_id: "ID".into(),
        }
    }

    #[test]
    fn maps_all_five_fields() {
        let rows = vec![row(&[
            ("Sys", CellValue::from("HVAC")),
            ("Sub", CellValue::from("Air Handling")),
            ("Floor", CellValue::from(3.0)),
            ("Name", CellValue::from("AHU-01")),
            ("ID", CellValue::from("A-7")),
        ])];
        let assets = normalize(&rows, &full_mapping());
        assert_eq!(assets.len(), 1);
        let asset = &assets[0];
        assert_eq!(asset.system, "HVAC");
        assert_eq!(asset.sub_system, "Air Handling");
        assert_eq!(asset.floor, "3");
        assert_eq!(asset.name, "AHU-01");
        assert_eq!(asset.asset_id.as_deref(), Some("A-7"));
    }

    #[test]
    fn fully_blank_row_normalizes_to_sentinels() {
        // Everything blank, no asset id.
        let rows = vec![RawRow::new()];
        let assets = normalize(&rows, &full_mapping());
        let asset = &assets[0];
        assert_eq!(asset.system, "Uncategorized System");
        assert_eq!(asset.sub_system, "Uncategorized Sub-System");
        assert_eq!(asset.floor, "Uncategorized Floor");
        assert_eq!(asset.name, "Unnamed Asset #1");
        assert_eq!(asset.asset_id, None);
    }

    #[test]
    fn unmapped_fields_resolve_to_defaults() {
        let rows = vec![row(&[("Name", CellValue::from("Chiller"))])];
        let assets = normalize(&rows, &ColumnMapping::default());
        // Name column exists in the row but is unmapped, so the asset is unnamed.
        assert_eq!(assets[0].name, "Unnamed Asset #1");
        assert_eq!(assets[0].system, "Uncategorized System");
    }

    #[test]
    fn whitespace_cells_count_as_blank() {
        let rows = vec![row(&[
            ("Sys", CellValue::from("   ")),
            ("Name", CellValue::from("  Pump ")),
        ])];
        let assets = normalize(&rows, &full_mapping());
        assert_eq!(assets[0].system, "Uncategorized System");
        assert_eq!(assets[0].name, "Pump");
    }

    #[test]
    fn unnamed_counter_per_floor_triple() {
        let make = |floor: &str| {
            row(&[
                ("Sys", CellValue::from("HVAC")),
                ("Floor", CellValue::from(floor)),
            ])
        };
        let rows = vec![make("1"), make("1"), make("2"), make("1")];
        let assets = normalize(&rows, &full_mapping());
        assert_eq!(assets[0].name, "Unnamed Asset #1");
        assert_eq!(assets[1].name, "Unnamed Asset #2");
        assert_eq!(assets[2].name, "Unnamed Asset #1"); // independent triple
        assert_eq!(assets[3].name, "Unnamed Asset #3");
    }

    #[test]
    fn numbering_recomputed_each_call() {
        let rows = vec![RawRow::new()];
        let mapping = full_mapping();
        let first = normalize(&rows, &mapping);
        let second = normalize(&rows, &mapping);
        assert_eq!(first[0].name, "Unnamed Asset #1");
        assert_eq!(second[0].name, "Unnamed Asset #1");
    }

    #[test]
    fn numeric_floor_uses_integer_string_form() {
        let rows = vec![row(&[("Floor", CellValue::from(2.0))])];
        let assets = normalize(&rows, &full_mapping());
        assert_eq!(assets[0].floor, "2");
    }

    #[test]
    fn blank_asset_id_is_none() {
        let rows = vec![row(&[("ID", CellValue::from("  "))])];
        let assets = normalize(&rows, &full_mapping());
        assert_eq!(assets[0].asset_id, None);
    }

    #[test]
    fn empty_row_list_yields_no_assets() {
        assert!(normalize(&[], &full_mapping()).is_empty());
    }

    #[test]
    fn output_order_matches_row_order() {
        let rows = vec![
            row(&[("Name", CellValue::from("B"))]),
            row(&[("Name", CellValue::from("A"))]),
        ];
        let assets = normalize(&rows, &full_mapping());
        assert_eq!(assets[0].name, "B");
        assert_eq!(assets[1].name, "A");
    }

    #[test]
    fn hvac_rows_on_distinct_floors_each_start_at_one() {
        // Two HVAC rows with floors 1/2 and IDs, no name column mapped.
        let rows = vec![
            row(&[
                ("Sys", CellValue::from("HVAC")),
                ("Floor", CellValue::from("1")),
                ("ID", CellValue::from("A1")),
            ]),
            row(&[
                ("Sys", CellValue::from("HVAC")),
                ("Floor", CellValue::from("2")),
                ("ID", CellValue::from("A2")),
            ]),
        ];
        let mapping = ColumnMapping {
            system: "Sys".into(),
            floor: "Floor".into(),
            asset_id: "ID".into(),
            ..ColumnMapping::default()
        };
        let assets = normalize(&rows, &mapping);
        assert_eq!(assets[0].system, "HVAC");
        assert_eq!(assets[0].sub_system, "Uncategorized Sub-System");
        assert_eq!(assets[0].floor, "1");
        assert_eq!(assets[0].name, "Unnamed Asset #1");
        assert_eq!(assets[0].asset_id.as_deref(), Some("A1"));
        assert_eq!(assets[1].floor, "2");
        assert_eq!(assets[1].name, "Unnamed Asset #1"); // floors are distinct triples
        assert_eq!(assets[1].asset_id.as_deref(), Some("A2"));
    }
}
