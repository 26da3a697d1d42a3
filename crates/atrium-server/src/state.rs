//! Server-owned session state: the uploaded table, the active column
//! mapping, and everything derived from them.
//!
//! Derivation is all-or-nothing: any change to the table or the mapping
//! fully re-derives the asset list and the tree and resets the selection.
//! Nothing is patched incrementally.

use std::sync::Arc;
use std::time::Instant;

use atrium_core::{
    build_hierarchy, match_raw_rows, Asset, ColumnMapping, HierarchyNode, RawRow, SelectionState,
    Table,
};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::errors::{ApiError, Result};

/// The key a client uses to pick a single asset under a floor node.
pub enum AssetKey {
    /// Match on the external asset id.
    Id(String),
    /// Match on the display name.
    Name(String),
}

/// The filtered view returned by the selection endpoints.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// Path of the active selection, if any.
    pub path: Option<String>,
    /// Assets covered by the selection (all assets when nothing is selected).
    pub assets: Vec<Asset>,
    /// Raw rows matching the selection (all rows when nothing is selected).
    pub rows: Vec<RawRow>,
}

/// One client session: uploaded data plus everything derived from it.
pub struct Session {
    /// The uploaded table, if any.
    pub table: Option<Table>,
    /// The active column mapping.
    pub mapping: ColumnMapping,
    /// Assets derived from the table under the current mapping.
    pub assets: Vec<Asset>,
    /// The derived tree.
    pub tree: HierarchyNode,
    /// The active selection.
    pub selection: SelectionState,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            table: None,
            mapping: ColumnMapping::default(),
            assets: Vec::new(),
            tree: HierarchyNode::root(),
            selection: SelectionState::default(),
        }
    }
}

impl Session {
    /// Replace the uploaded table. Re-derives everything and clears the
    /// selection.
    pub fn load_table(&mut self, table: Table) {
        info!(columns = table.columns.len(), rows = table.row_count(), "workbook loaded");
        self.table = Some(table);
        self.rederive();
    }

    /// Replace the column mapping. Re-derives everything and clears the
    /// selection.
    pub fn set_mapping(&mut self, mapping: ColumnMapping) {
        self.mapping = mapping;
        self.rederive();
    }

    fn rederive(&mut self) {
        let rows: &[RawRow] = self.table.as_ref().map_or(&[], |t| t.rows.as_slice());
        self.assets = atrium_core::normalize(rows, &self.mapping);
        self.tree = build_hierarchy(&self.assets);
        self.selection.clear();
    }

    /// Select the tree node at `path`.
    pub fn select_path(&mut self, path: &str) -> Result<()> {
        let node = self
            .tree
            .find(path)
            .ok_or_else(|| ApiError::UnknownPath(path.to_owned()))?;
        self.selection.select_node(node);
        Ok(())
    }

    /// Select a single asset under the floor node at `parent_path`.
    pub fn select_asset(&mut self, parent_path: &str, key: &AssetKey) -> Result<()> {
        let node = self
            .tree
            .find(parent_path)
            .ok_or_else(|| ApiError::UnknownPath(parent_path.to_owned()))?;
        let asset = node
            .assets
            .iter()
            .find(|asset| match key {
                AssetKey::Id(id) => asset.asset_id.as_deref() == Some(id.as_str()),
                AssetKey::Name(name) => asset.name == *name,
            })
            .ok_or_else(|| ApiError::AssetNotFound {
                key: match key {
                    AssetKey::Id(id) => id.clone(),
                    AssetKey::Name(name) => name.clone(),
                },
                parent: parent_path.to_owned(),
            })?;
        self.selection.select_asset(asset, parent_path);
        Ok(())
    }

    /// Clear the selection; full lists are restored.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The current filtered view. With no selection this is the full asset
    /// list and every row.
    #[must_use]
    pub fn view(&self) -> View {
        let rows: &[RawRow] = self.table.as_ref().map_or(&[], |t| t.rows.as_slice());
        let (assets, matched) = if self.selection.is_none() {
            (self.assets.clone(), rows.iter().collect::<Vec<_>>())
        } else {
            let selected = self.selection.selected_assets();
            (selected.to_vec(), match_raw_rows(selected, rows, &self.mapping))
        };
        View {
            path: self.selection.path().map(str::to_owned),
            assets,
            rows: matched.into_iter().cloned().collect(),
        }
    }
}

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single server session.
    pub session: Arc<RwLock<Session>>,
    /// When the server started.
    pub start_time: Instant,
}

impl AppState {
    /// Create fresh state with an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::default())),
            start_time: Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use atrium_core::CellValue;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(c, v)| ((*c).to_owned(), CellValue::from(*v)))
            .collect()
    }

    fn loaded_session() -> Session {
        let mut session = Session::default();
        session.set_mapping(ColumnMapping {
            system: "Sys".into(),
            floor: "Floor".into(),
            asset_id: "ID".into(),
            ..ColumnMapping::default()
        });
        session.load_table(Table::new(
            vec!["Sys".into(), "Floor".into(), "ID".into()],
            vec![
                row(&[("Sys", "HVAC"), ("Floor", "1"), ("ID", "A1")]),
                row(&[("Sys", "HVAC"), ("Floor", "2"), ("ID", "A2")]),
                row(&[("Sys", "Plumbing"), ("Floor", "1"), ("ID", "P1")]),
            ],
        ));
        session
    }

    #[test]
    fn empty_session_has_bare_view() {
        let session = Session::default();
        let view = session.view();
        assert_eq!(view.path, None);
        assert!(view.assets.is_empty());
        assert!(view.rows.is_empty());
    }

    #[test]
    fn load_table_derives_assets_and_tree() {
        let session = loaded_session();
        assert_eq!(session.assets.len(), 3);
        assert_eq!(session.tree.total_asset_count, 3);
        assert!(session.selection.is_none());
    }

    #[test]
    fn set_mapping_rederives_and_clears_selection() {
        let mut session = loaded_session();
        session.select_path("/system:HVAC").unwrap();
        assert!(!session.selection.is_none());

        session.set_mapping(ColumnMapping {
            system: "Floor".into(),
            ..ColumnMapping::default()
        });
        assert!(session.selection.is_none());
        // "1" and "2" are now the systems.
        assert!(session.tree.children.contains_key("1"));
    }

    #[test]
    fn select_path_filters_view() {
        let mut session = loaded_session();
        session.select_path("/system:HVAC").unwrap();
        let view = session.view();
        assert_eq!(view.path.as_deref(), Some("/system:HVAC"));
        assert_eq!(view.assets.len(), 2);
        assert_eq!(view.rows.len(), 2);
    }

    #[test]
    fn select_unknown_path_errors() {
        let mut session = loaded_session();
        let err = session.select_path("/system:Nope").unwrap_err();
        assert_matches!(err, ApiError::UnknownPath(_));
    }

    #[test]
    fn select_asset_by_id() {
        let mut session = loaded_session();
        let parent = "/system:HVAC/subsystem:Uncategorized Sub-System/floor:2";
        session.select_asset(parent, &AssetKey::Id("A2".into())).unwrap();
        let view = session.view();
        assert_eq!(view.assets.len(), 1);
        assert_eq!(view.rows.len(), 1);
        let expected = format!("{parent}/asset:A2");
        assert_eq!(view.path.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn select_missing_asset_errors() {
        let mut session = loaded_session();
        let parent = "/system:HVAC/subsystem:Uncategorized Sub-System/floor:2";
        let err = session
            .select_asset(parent, &AssetKey::Name("nope".into()))
            .unwrap_err();
        assert_matches!(err, ApiError::AssetNotFound { .. });
    }

    #[test]
    fn clear_selection_restores_full_view() {
        let mut session = loaded_session();
        session.select_path("/system:HVAC").unwrap();
        session.clear_selection();
        let view = session.view();
        assert_eq!(view.path, None);
        assert_eq!(view.assets.len(), 3);
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn reload_replaces_previous_table() {
        let mut session = loaded_session();
        session.load_table(Table::new(
            vec!["Sys".into()],
            vec![row(&[("Sys", "Electrical")])],
        ));
        assert_eq!(session.assets.len(), 1);
        assert_eq!(session.tree.children.len(), 1);
    }
}
