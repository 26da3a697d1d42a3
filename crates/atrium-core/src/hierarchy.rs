//! The hierarchy builder: a flat asset list → a deterministic three-level
//! tree (system → sub-system → floor), annotated with aggregate counts.
//!
//! The stored child maps are insertion-ordered and unsorted; rendering order
//! is a traversal-time policy ([`HierarchyNode::sorted_children`],
//! [`HierarchyNode::sorted_assets`]): sentinel labels always sort after all
//! non-sentinel siblings, and `Unnamed Asset` entries after all named ones.
//!
//! The tree is a plain owned structure rebuilt from scratch whenever the
//! asset list changes; nothing is mutated incrementally.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::asset::{
    is_sentinel_label, is_unnamed_label, Asset, UNCATEGORIZED_FLOOR, UNCATEGORIZED_SUB_SYSTEM,
    UNCATEGORIZED_SYSTEM,
};

/// One grouping level of the asset tree.
///
/// The `path` is the canonical identity of a node: two nodes with the same
/// ancestor label sequence are the same node. Only floor-level nodes hold
/// assets directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    /// Display label.
    pub name: String,
    /// Canonical key, e.g. `/system:HVAC/subsystem:Air/floor:3`. Empty for
    /// the synthetic root.
    pub path: String,
    /// Child nodes in first-visit (insertion) order.
    pub children: IndexMap<String, HierarchyNode>,
    /// Assets directly at this level (floor nodes only).
    pub assets: Vec<Asset>,
    /// Own assets plus all descendant assets, computed bottom-up.
    pub total_asset_count: usize,
}

impl HierarchyNode {
    /// The synthetic root node.
    #[must_use]
    pub fn root() -> Self {
        Self::new("root", "")
    }

    fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: IndexMap::new(),
            assets: Vec::new(),
            total_asset_count: 0,
        }
    }

    /// Walk to the child named `name`, creating it on first visit.
    fn child_entry(&mut self, name: &str, path: String) -> &mut Self {
        self.children
            .entry(name.to_owned())
            .or_insert_with(|| Self::new(name, path))
    }

    /// Find the node with the given canonical path, in this node's subtree.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Self> {
        if self.path == path {
            return Some(self);
        }
        self.children.values().find_map(|child| child.find(path))
    }

    /// Children in rendering order: non-sentinel labels first, each group
    /// string-sorted among themselves.
    #[must_use]
    pub fn sorted_children(&self) -> Vec<&Self> {
        let mut children: Vec<&Self> = self.children.values().collect();
        children.sort_by(|a, b| compare_labels(&a.name, &b.name));
        children
    }

    /// Assets in rendering order: named assets first (alphabetical), then
    /// `Unnamed Asset` entries (alphabetical over the full label — so
    /// `#10` sorts before `#2`).
    #[must_use]
    pub fn sorted_assets(&self) -> Vec<&Asset> {
        let mut assets: Vec<&Asset> = self.assets.iter().collect();
        assets.sort_by(|a, b| compare_asset_names(&a.name, &b.name));
        assets
    }

    /// Post-order count computation. Returns this subtree's total.
    fn compute_counts(&mut self) -> usize {
        let mut total = self.assets.len();
        for child in self.children.values_mut() {
            total += child.compute_counts();
        }
        self.total_asset_count = total;
        total
    }
}

/// Build the asset tree from a flat asset list.
///
/// Each asset is placed by walking/creating the path system → sub-system →
/// floor in list order; intermediate nodes get their canonical path on
/// first visit. Blank grouping fields (possible when assets bypass the
/// normalizer) degrade to the sentinel labels instead of failing. Duplicate
/// assets are preserved as distinct entries.
#[must_use]
pub fn build_hierarchy(assets: &[Asset]) -> HierarchyNode {
    let mut root = HierarchyNode::root();

    for asset in assets {
        let system = non_blank(&asset.system, UNCATEGORIZED_SYSTEM);
        let sub_system = non_blank(&asset.sub_system, UNCATEGORIZED_SUB_SYSTEM);
        let floor = non_blank(&asset.floor, UNCATEGORIZED_FLOOR);

        let system_path = format!("/system:{system}");
        let sub_path = format!("{system_path}/subsystem:{sub_system}");
        let floor_path = format!("{sub_path}/floor:{floor}");

        let floor_node = root
            .child_entry(system, system_path.clone())
            .child_entry(sub_system, sub_path)
            .child_entry(floor, floor_path);
        floor_node.assets.push(asset.clone());
    }

    let total = root.compute_counts();
    debug!(assets = assets.len(), total, systems = root.children.len(), "built hierarchy");
    root
}

fn non_blank<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

/// Rendering order for sibling labels: sentinels after everything else,
/// string comparison within each group.
#[must_use]
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    match (is_sentinel_label(a), is_sentinel_label(b)) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.cmp(b),
    }
}

/// Rendering order for assets within a floor node: unnamed entries last,
/// string comparison within each group.
#[must_use]
pub fn compare_asset_names(a: &str, b: &str) -> Ordering {
    match (is_unnamed_label(a), is_unnamed_label(b)) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.cmp(b),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
