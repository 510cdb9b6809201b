//! Version strategy traits

use gantry_core::error::{Result, VersionError};
use gantry_core::types::BumpType;

use crate::types::VersionComponents;

/// Trait for version strategies
pub trait VersionStrategy: Send + Sync {
    /// Get the name of this strategy
    fn name(&self) -> &'static str;

    /// Parse a version string into components
    fn parse(&self, version: &str) -> std::result::Result<VersionComponents, VersionError>;

    /// Format version components into a string
    fn format(&self, components: &VersionComponents) -> String;

    /// Bump the version according to the bump type
    fn bump(&self, current: &VersionComponents, bump_type: BumpType) -> VersionComponents;

    /// Parse, bump, and format in one step
    fn bump_version(&self, current: &str, bump_type: BumpType) -> Result<String> {
        let parsed = self.parse(current)?;
        Ok(self.format(&self.bump(&parsed, bump_type)))
    }

    /// Check if a version string is valid for this strategy
    fn is_valid(&self, version: &str) -> bool {
        self.parse(version).is_ok()
    }
}
