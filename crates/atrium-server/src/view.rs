//! Render-ordered tree serialization.
//!
//! The stored tree keeps children in first-visit order; clients get the
//! rendering order instead (sentinel labels after everything else, unnamed
//! assets after named ones), applied here at serialization time.

use atrium_core::{Asset, HierarchyNode};
use serde::Serialize;

/// A tree node in rendering order, ready to serialize.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNodeView {
    /// Display label.
    pub name: String,
    /// Canonical path.
    pub path: String,
    /// Own assets plus all descendant assets.
    pub total_asset_count: usize,
    /// Child nodes in rendering order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNodeView>,
    /// Assets in rendering order (floor nodes only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<Asset>,
}

impl TreeNodeView {
    /// Project a stored node (and its subtree) into rendering order.
    #[must_use]
    pub fn from_node(node: &HierarchyNode) -> Self {
        Self {
            name: node.name.clone(),
            path: node.path.clone(),
            total_asset_count: node.total_asset_count,
            children: node.sorted_children().into_iter().map(Self::from_node).collect(),
            assets: node.sorted_assets().into_iter().cloned().collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
