//! Owning-project resolution
//!
//! The release helper operates on the project that contains the working
//! directory: the nearest ancestor with a `package.json`. That directory
//! owns both the manifest and the changelog.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use gantry_core::error::{ManifestError, Result};

use crate::manifest::PackageJson;

/// File name of the project metadata document
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Handle to the owning project's manifest
#[derive(Debug, Clone)]
pub struct ProjectManifest {
    path: PathBuf,
}

impl ProjectManifest {
    /// Walk up from `start` to the nearest directory containing a
    /// `package.json`
    #[instrument(fields(start = %start.display()))]
    pub fn discover(start: &Path) -> Result<Self> {
        let mut dir = Some(start);

        while let Some(current) = dir {
            let candidate = current.join(MANIFEST_FILE_NAME);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "resolved project manifest");
                return Ok(Self { path: candidate });
            }
            dir = current.parent();
        }

        Err(ManifestError::ProjectNotFound(start.to_path_buf()).into())
    }

    /// Use the manifest in exactly the given directory
    pub fn at(dir: &Path) -> Self {
        Self {
            path: dir.join(MANIFEST_FILE_NAME),
        }
    }

    /// Path of the manifest file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory owning the manifest (and the changelog)
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// Read the current version string from the manifest
    pub fn read_version(&self) -> Result<String> {
        Ok(PackageJson::load(&self.path)?.version)
    }

    /// Persist a new version, preserving all other fields
    pub fn write_version(&self, version: &str) -> Result<()> {
        let mut pkg = PackageJson::load(&self.path)?;
        pkg.version = version.to_string();
        pkg.save(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_walks_up() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"name": "test", "version": "1.0.0"}"#,
        )
        .unwrap();

        let nested = temp.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let manifest = ProjectManifest::discover(&nested).unwrap();
        assert_eq!(manifest.dir(), temp.path());
    }

    #[test]
    fn test_discover_prefers_nearest() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"name": "outer", "version": "1.0.0"}"#,
        )
        .unwrap();

        let inner = temp.path().join("packages").join("inner");
        std::fs::create_dir_all(&inner).unwrap();
        std::fs::write(
            inner.join("package.json"),
            r#"{"name": "inner", "version": "2.0.0"}"#,
        )
        .unwrap();

        let manifest = ProjectManifest::discover(&inner).unwrap();
        assert_eq!(manifest.read_version().unwrap(), "2.0.0");
    }

    #[test]
    fn test_discover_without_manifest_fails() {
        let temp = TempDir::new().unwrap();
        let result = ProjectManifest::discover(temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_version_roundtrip() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"name": "test", "version": "1.0.0", "license": "MIT"}"#,
        )
        .unwrap();

        let manifest = ProjectManifest::at(temp.path());
        assert_eq!(manifest.read_version().unwrap(), "1.0.0");

        manifest.write_version("1.1.0").unwrap();
        assert_eq!(manifest.read_version().unwrap(), "1.1.0");

        let content = std::fs::read_to_string(manifest.path()).unwrap();
        assert!(content.contains("MIT"));
    }
}
