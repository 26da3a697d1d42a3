//! The semantic asset record and its placeholder-label vocabulary.

use serde::{Deserialize, Serialize};

/// Sentinel label substituted for a blank system.
pub const UNCATEGORIZED_SYSTEM: &str = "Uncategorized System";
/// Sentinel label substituted for a blank sub-system.
pub const UNCATEGORIZED_SUB_SYSTEM: &str = "Uncategorized Sub-System";
/// Sentinel label substituted for a blank floor.
pub const UNCATEGORIZED_FLOOR: &str = "Uncategorized Floor";
/// Prefix of the labels assigned to assets with a blank name.
pub const UNNAMED_ASSET_PREFIX: &str = "Unnamed Asset";

/// Whether a grouping label is one of the synthesized "Uncategorized …"
/// placeholders. Matches on the substring, so source data containing the
/// word also sorts with the sentinels.
#[must_use]
pub fn is_sentinel_label(label: &str) -> bool {
    label.contains("Uncategorized")
}

/// Whether an asset name is a synthesized `Unnamed Asset #k` label.
#[must_use]
pub fn is_unnamed_label(name: &str) -> bool {
    name.starts_with(UNNAMED_ASSET_PREFIX)
}

/// A single building-equipment record.
///
/// After normalization, `name`, `system`, `sub_system`, and `floor` are
/// never empty; blanks have been replaced by sentinel or `Unnamed Asset #k`
/// labels. The descriptive fields are carried but never interpreted by the
/// core.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Internal identifier, when the source provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// External (BIM / asset) identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    /// Display name.
    pub name: String,
    /// Top grouping level.
    pub system: String,
    /// Second grouping level.
    pub sub_system: String,
    /// Third grouping level.
    pub floor: String,
    /// Purchase date, uninterpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    /// Monetary value, uninterpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Condition note, uninterpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Last maintenance date, uninterpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_maintenance: Option<String>,
    /// Next maintenance date, uninterpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_maintenance: Option<String>,
    /// Free-form notes, uninterpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Asset {
    /// Create an asset with the four grouping/display fields set.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        system: impl Into<String>,
        sub_system: impl Into<String>,
        floor: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            system: system.into(),
            sub_system: sub_system.into(),
            floor: floor.into(),
            ..Self::default()
        }
    }

    /// Set the external asset identifier.
    #[must_use]
    pub fn with_asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }

    /// The `(system, sub_system, floor)` grouping triple.
    #[must_use]
    pub fn group_key(&self) -> (&str, &str, &str) {
        (&self.system, &self.sub_system, &self.floor)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_labels_recognized() {
        assert!(is_sentinel_label(UNCATEGORIZED_SYSTEM));
        assert!(is_sentinel_label(UNCATEGORIZED_SUB_SYSTEM));
        assert!(is_sentinel_label(UNCATEGORIZED_FLOOR));
        assert!(!is_sentinel_label("HVAC"));
    }

    #[test]
    fn sentinel_matches_substring() {
        // The check is a substring match, not equality.
        assert!(is_sentinel_label("My Uncategorized Pumps"));
    }

    #[test]
    fn unnamed_labels_recognized() {
        assert!(is_unnamed_label("Unnamed Asset #1"));
        assert!(is_unnamed_label("Unnamed Asset #12"));
        assert!(!is_unnamed_label("AHU-01"));
    }

    #[test]
    fn group_key() {
        let asset = Asset::new("Pump", "Plumbing", "Water", "2");
        assert_eq!(asset.group_key(), ("Plumbing", "Water", "2"));
    }

    #[test]
    fn serde_skips_absent_optionals() {
        let asset = Asset::new("Pump", "Plumbing", "Water", "2");
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["name"], "Pump");
        assert_eq!(json["subSystem"], "Water");
        assert!(json.get("assetId").is_none());
        assert!(json.get("purchaseDate").is_none());
    }

    #[test]
    fn serde_roundtrip_with_asset_id() {
        let asset = Asset::new("AHU-01", "HVAC", "Air", "3").with_asset_id("A-7");
        let json = serde_json::to_string(&asset).unwrap();
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(asset, back);
    }
}
