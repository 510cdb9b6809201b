//! SemVer version strategy

use gantry_core::error::VersionError;
use gantry_core::types::BumpType;

use crate::traits::VersionStrategy;
use crate::types::VersionComponents;

/// Semantic Versioning strategy
///
/// Parses and bumps plain `major.minor.patch` versions. Prerelease and
/// build channels are rejected: the release flow only ever produces the
/// three-component form.
pub struct SemVerStrategy;

impl SemVerStrategy {
    /// Create a new SemVer strategy
    pub fn new() -> Self {
        Self
    }
}

impl Default for SemVerStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionStrategy for SemVerStrategy {
    fn name(&self) -> &'static str {
        "semver"
    }

    fn parse(&self, version: &str) -> Result<VersionComponents, VersionError> {
        // Strip leading 'v' if present
        let stripped = version.strip_prefix('v').unwrap_or(version);

        let v = semver::Version::parse(stripped)
            .map_err(|e| VersionError::ParseFailed(version.to_string(), e.to_string()))?;

        if !v.pre.is_empty() || !v.build.is_empty() {
            return Err(VersionError::ParseFailed(
                version.to_string(),
                "expected exactly three dot-separated integers".to_string(),
            ));
        }

        Ok(VersionComponents {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
        })
    }

    fn format(&self, components: &VersionComponents) -> String {
        components.to_version_string()
    }

    fn bump(&self, current: &VersionComponents, bump_type: BumpType) -> VersionComponents {
        let mut result = *current;

        match bump_type {
            BumpType::Major => {
                result.major += 1;
                result.minor = 0;
                result.patch = 0;
            }
            BumpType::Minor => {
                result.minor += 1;
                result.patch = 0;
            }
            BumpType::Patch => {
                result.patch += 1;
            }
        }

        result
    }
}
