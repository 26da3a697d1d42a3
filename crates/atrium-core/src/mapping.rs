//! User-declared correspondence between semantic fields and spreadsheet
//! columns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five semantic fields a spreadsheet column can be mapped onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticField {
    /// Top grouping level.
    System,
    /// Second grouping level.
    SubSystem,
    /// Third grouping level; the only level that holds assets directly.
    Floor,
    /// Asset display name.
    Name,
    /// External asset identifier (BIM / asset ID).
    AssetId,
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::SubSystem => write!(f, "subSystem"),
            Self::Floor => write!(f, "floor"),
            Self::Name => write!(f, "name"),
            Self::AssetId => write!(f, "assetId"),
        }
    }
}

/// Assignment from semantic fields to spreadsheet column names.
///
/// An empty string means the field is unmapped. An unmapped or dangling
/// column name is never an error: affected fields simply normalize to their
/// defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnMapping {
    /// Column holding the system label.
    pub system: String,
    /// Column holding the sub-system label.
    pub sub_system: String,
    /// Column holding the floor label.
    pub floor: String,
    /// Column holding the asset name.
    pub name: String,
    /// Column holding the external asset identifier.
    pub asset_id: String,
}

impl ColumnMapping {
    /// The configured column for `field`, or `None` when unmapped.
    #[must_use]
    pub fn column(&self, field: SemanticField) -> Option<&str> {
        let column = match field {
            SemanticField::System => &self.system,
            SemanticField::SubSystem => &self.sub_system,
            SemanticField::Floor => &self.floor,
            SemanticField::Name => &self.name,
            SemanticField::AssetId => &self.asset_id,
        };
        if column.is_empty() {
            None
        } else {
            Some(column)
        }
    }

    /// Whether `field` has a column assigned.
    #[must_use]
    pub fn is_mapped(&self, field: SemanticField) -> bool {
        self.column(field).is_some()
    }

    /// Assign (or clear, with an empty string) the column for `field`.
    pub fn set(&mut self, field: SemanticField, column: impl Into<String>) {
        let column = column.into();
        match field {
            SemanticField::System => self.system = column,
            SemanticField::SubSystem => self.sub_system = column,
            SemanticField::Floor => self.floor = column,
            SemanticField::Name => self.name = column,
            SemanticField::AssetId => self.asset_id = column,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fully_unmapped() {
        let mapping = ColumnMapping::default();
        for field in [
            SemanticField::System,
            SemanticField::SubSystem,
            SemanticField::Floor,
            SemanticField::Name,
            SemanticField::AssetId,
        ] {
            assert!(!mapping.is_mapped(field), "{field} should be unmapped");
        }
    }

    #[test]
    fn set_and_column() {
        let mut mapping = ColumnMapping::default();
        mapping.set(SemanticField::Floor, "Level");
        assert_eq!(mapping.column(SemanticField::Floor), Some("Level"));
        assert!(mapping.is_mapped(SemanticField::Floor));
    }

    #[test]
    fn set_empty_clears() {
        let mut mapping = ColumnMapping::default();
        mapping.set(SemanticField::System, "Sys");
        mapping.set(SemanticField::System, "");
        assert_eq!(mapping.column(SemanticField::System), None);
    }

    #[test]
    fn serde_uses_camel_case() {
        let mut mapping = ColumnMapping::default();
        mapping.set(SemanticField::SubSystem, "Sub");
        mapping.set(SemanticField::AssetId, "ID");
        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(json["subSystem"], "Sub");
        assert_eq!(json["assetId"], "ID");
    }

    #[test]
    fn deserialize_partial_body() {
        let mapping: ColumnMapping =
            serde_json::from_str(r#"{"system":"Sys"}"#).unwrap();
        assert_eq!(mapping.system, "Sys");
        assert_eq!(mapping.floor, "");
    }

    #[test]
    fn field_display() {
        assert_eq!(SemanticField::System.to_string(), "system");
        assert_eq!(SemanticField::SubSystem.to_string(), "subSystem");
        assert_eq!(SemanticField::AssetId.to_string(), "assetId");
    }
}
