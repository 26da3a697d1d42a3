//! The selection filter: tree selections → flat asset sets → raw-row
//! filters.
//!
//! - [`select_node`]: everything under a tree node, depth-first
//! - [`select_asset`]: a single leaf, with its `/asset:` path suffix
//! - [`match_raw_rows`]: best-effort mapping of selected assets back onto
//!   the original raw rows
//! - [`SelectionState`]: the `None` / node / asset state machine owned by
//!   the caller
//!
//! All functions are pure over their inputs and have no failure mode: a
//! malformed mapping yields broader or narrower matches, never an error.

use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::hierarchy::HierarchyNode;
use crate::mapping::{ColumnMapping, SemanticField};
use crate::table::RawRow;

/// The result of selecting a tree node or a single asset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Canonical path of the selected node (or parent path plus `/asset:`
    /// suffix for a leaf).
    pub path: String,
    /// Every asset covered by the selection.
    pub assets: Vec<Asset>,
}

/// Select a tree node: its path plus the flattened list of every asset in
/// its subtree, own assets first, then each child's depth-first in stored
/// order.
#[must_use]
pub fn select_node(node: &HierarchyNode) -> Selection {
    let mut assets = Vec::with_capacity(node.total_asset_count);
    collect_assets(node, &mut assets);
    Selection {
        path: node.path.clone(),
        assets,
    }
}

fn collect_assets(node: &HierarchyNode, out: &mut Vec<Asset>) {
    out.extend(node.assets.iter().cloned());
    for child in node.children.values() {
        collect_assets(child, out);
    }
}

/// Select a single asset under `parent_path`. The leaf path is keyed by the
/// external asset id when present, otherwise by the display name.
#[must_use]
pub fn select_asset(asset: &Asset, parent_path: &str) -> Selection {
    let key = asset.asset_id.as_deref().unwrap_or(&asset.name);
    Selection {
        path: format!("{parent_path}/asset:{key}"),
        assets: vec![asset.clone()],
    }
}

/// Filter raw rows down to those matching at least one selected asset.
///
/// An empty selection means "no filter": all rows are returned.
///
/// Per asset, a non-empty `asset_id` compared against a non-empty mapped
/// asset-id cell is authoritative and short-circuits the remaining checks.
/// Otherwise all four of {name, system, sub-system, floor} must hold, where
/// each criterion is vacuously satisfied when the field is unmapped or the
/// asset's value is blank, and otherwise requires a present mapped cell
/// whose string form equals the asset's value. Vacuous criteria can
/// over-match when several grouping fields are unmapped; the matching is
/// permissive, never an error.
#[must_use]
pub fn match_raw_rows<'a>(
    selected: &[Asset],
    rows: &'a [RawRow],
    mapping: &ColumnMapping,
) -> Vec<&'a RawRow> {
    if selected.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| selected.iter().any(|asset| asset_matches_row(asset, row, mapping)))
        .collect()
}

fn asset_matches_row(asset: &Asset, row: &RawRow, mapping: &ColumnMapping) -> bool {
    // Authoritative id check, when both sides have one.
    if let Some(asset_id) = asset.asset_id.as_deref().filter(|id| !id.is_empty()) {
        if let Some(column) = mapping.column(SemanticField::AssetId) {
            if let Some(row_id) = row.text(column).filter(|id| !id.is_empty()) {
                return row_id == asset_id;
            }
        }
    }

    criterion_holds(row, mapping, SemanticField::Name, &asset.name)
        && criterion_holds(row, mapping, SemanticField::System, &asset.system)
        && criterion_holds(row, mapping, SemanticField::SubSystem, &asset.sub_system)
        && criterion_holds(row, mapping, SemanticField::Floor, &asset.floor)
}

/// One leg of the AND-of-ORs rule: unmapped field, blank asset value, or
/// equal string forms.
fn criterion_holds(
    row: &RawRow,
    mapping: &ColumnMapping,
    field: SemanticField,
    asset_value: &str,
) -> bool {
    let Some(column) = mapping.column(field) else {
        return true;
    };
    if asset_value.is_empty() {
        return true;
    }
    row.text(column).is_some_and(|cell| cell == asset_value)
}

// ─────────────────────────────────────────────────────────────────────────────
// SelectionState
// ─────────────────────────────────────────────────────────────────────────────

/// The caller-owned selection state machine.
///
/// Selecting a node clears any asset selection; selecting an asset clears
/// any node selection; clearing resets to `None` (full unfiltered lists).
/// There is no other transition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SelectionState {
    /// Nothing selected; no filter applies.
    #[default]
    None,
    /// A tree node is selected.
    Node(Selection),
    /// A single asset leaf is selected.
    Asset(Selection),
}

impl SelectionState {
    /// Transition to a node selection.
    pub fn select_node(&mut self, node: &HierarchyNode) {
        *self = Self::Node(select_node(node));
    }

    /// Transition to a single-asset selection.
    pub fn select_asset(&mut self, asset: &Asset, parent_path: &str) {
        *self = Self::Asset(select_asset(asset, parent_path));
    }

    /// Reset to `None`.
    pub fn clear(&mut self) {
        *self = Self::None;
    }

    /// The active selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Self::None => None,
            Self::Node(selection) | Self::Asset(selection) => Some(selection),
        }
    }

    /// Assets covered by the active selection; empty when nothing is
    /// selected (which [`match_raw_rows`] treats as "no filter").
    #[must_use]
    pub fn selected_assets(&self) -> &[Asset] {
        self.selection().map_or(&[], |s| s.assets.as_slice())
    }

    /// Path of the active selection, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.selection().map(|s| s.path.as_str())
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
