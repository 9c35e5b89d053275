//! Builder configuration.

use serde::{Deserialize, Serialize};

use crate::declared::{classify_with, TypeSpec, ARRAY_MARKER, LEGACY_TYPE_NAMES};
use crate::error::BuildError;

/// Naming conventions and legacy handling used while building attributes.
/// Defaults match what the scene engine emits; hosts may load overrides from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuilderConfig {
    /// Type names that are skipped instead of rejected.
    pub legacy_types: Vec<String>,
    /// Key holding a child's type string inside a compound structure entry.
    pub type_key: String,
    /// Character opening the array annotation of a type string, e.g. `Integer[]`.
    pub array_marker: char,
    /// Name suffixes of the three Vec3/Euler component children.
    pub component_suffixes: [String; 3],
    /// Name suffixes of the three Color channel children.
    pub color_suffixes: [String; 3],
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            legacy_types: LEGACY_TYPE_NAMES.iter().map(|s| s.to_string()).collect(),
            type_key: "dataType".to_string(),
            array_marker: ARRAY_MARKER,
            component_suffixes: ["X".to_string(), "Y".to_string(), "Z".to_string()],
            color_suffixes: ["R".to_string(), "G".to_string(), "B".to_string()],
        }
    }
}

impl BuilderConfig {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn is_legacy(&self, type_name: &str) -> bool {
        self.legacy_types.iter().any(|t| t == type_name)
    }

    /// Classify a type string with this configuration's marker and legacy list.
    pub fn classify(&self, raw: &str) -> Result<TypeSpec, BuildError> {
        classify_with(raw, self.array_marker, |name| self.is_legacy(name))
    }
}
