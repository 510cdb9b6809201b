//! npm package.json handling

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gantry_core::error::{ManifestError, Result};

/// package.json structure
///
/// Only the fields this tool touches are modeled; everything else is
/// carried through the flattened map so a save never loses data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageJson {
    /// Package name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Package version
    pub version: String,

    /// Preserve other fields
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl PackageJson {
    /// Load package.json from path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| ManifestError::NotFound(path.to_path_buf()))?;

        serde_json::from_str(&content)
            .map_err(|e| ManifestError::ParseError(e.to_string()).into())
    }

    /// Save package.json to path
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ManifestError::UpdateError(e.to_string()))?;

        // Ensure trailing newline
        let content = if content.ends_with('\n') {
            content
        } else {
            format!("{}\n", content)
        };

        std::fs::write(path, content)
            .map_err(|e| ManifestError::UpdateError(e.to_string()).into())
    }
}
