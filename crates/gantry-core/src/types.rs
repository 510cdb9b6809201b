//! Shared types for Gantry

use serde::{Deserialize, Serialize};

/// Type of version bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    /// Major version bump (forced by the user)
    Major,
    /// Minor version bump (new features)
    Minor,
    /// Patch version bump (everything else)
    Patch,
}

impl BumpType {
    /// Get the higher priority bump type
    pub fn max(self, other: Self) -> Self {
        use BumpType::*;
        match (self, other) {
            (Major, _) | (_, Major) => Major,
            (Minor, _) | (_, Minor) => Minor,
            (Patch, Patch) => Patch,
        }
    }
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

/// One recognized conventional commit type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitTypeInfo {
    /// Message prefix, e.g. "feat"
    pub key: String,
    /// Singular label, e.g. "Feature"
    pub label: String,
    /// Plural section title, e.g. "Features"
    pub section: String,
    /// Human-readable description shown in the commit prompt
    pub description: String,
}

impl CommitTypeInfo {
    fn new(key: &str, label: &str, section: &str, description: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            section: section.to_string(),
            description: description.to_string(),
        }
    }
}

/// The set of recognized commit types
///
/// The classifier, formatter and commit prompt all treat this as injected
/// configuration rather than a hardcoded list, so a caller can swap or
/// extend the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitTypes {
    types: Vec<CommitTypeInfo>,
}

impl CommitTypes {
    /// The standard conventional-commits table
    pub fn conventional() -> Self {
        Self {
            types: vec![
                CommitTypeInfo::new("feat", "Feature", "Features", "A new feature"),
                CommitTypeInfo::new("fix", "Bug Fix", "Bug Fixes", "A bug fix"),
                CommitTypeInfo::new("docs", "Documentation", "Documentation", "Documentation only changes"),
                CommitTypeInfo::new(
                    "style",
                    "Style",
                    "Styles",
                    "Changes that do not affect the meaning of the code (white-space, formatting, missing semi-colons, etc)",
                ),
                CommitTypeInfo::new(
                    "refactor",
                    "Code Refactoring",
                    "Code Refactoring",
                    "A code change that neither fixes a bug nor adds a feature",
                ),
                CommitTypeInfo::new(
                    "perf",
                    "Performance Improvement",
                    "Performance Improvements",
                    "A code change that improves performance",
                ),
                CommitTypeInfo::new(
                    "test",
                    "Test",
                    "Tests",
                    "Adding missing tests or correcting existing tests",
                ),
                CommitTypeInfo::new(
                    "build",
                    "Build",
                    "Builds",
                    "Changes that affect the build system or external dependencies",
                ),
                CommitTypeInfo::new(
                    "ci",
                    "Continuous Integration",
                    "Continuous Integrations",
                    "Changes to CI configuration files and scripts",
                ),
                CommitTypeInfo::new(
                    "chore",
                    "Chore",
                    "Chores",
                    "Other changes that don't modify src or test files",
                ),
                CommitTypeInfo::new("revert", "Revert", "Reverts", "Reverts a previous commit"),
            ],
        }
    }

    /// Build a registry from an explicit list of types
    pub fn from_types(types: Vec<CommitTypeInfo>) -> Self {
        Self { types }
    }

    /// Iterate over the registered types
    pub fn iter(&self) -> impl Iterator<Item = &CommitTypeInfo> {
        self.types.iter()
    }

    /// Iterate over the registered message prefixes
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.key.as_str())
    }

    /// Look up a type by its message prefix
    pub fn get(&self, key: &str) -> Option<&CommitTypeInfo> {
        self.types.iter().find(|t| t.key == key)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for CommitTypes {
    fn default() -> Self {
        Self::conventional()
    }
}
