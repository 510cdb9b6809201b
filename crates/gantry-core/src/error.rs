//! Error types for Gantry

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using GantryError
pub type Result<T> = std::result::Result<T, GantryError>;

/// Main error type for Gantry operations
#[derive(Debug, Error)]
pub enum GantryError {
    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Manifest-related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Release-flow errors
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Tag already exists
    #[error("Tag already exists: {0}")]
    TagExists(String),

    /// Nothing staged for commit
    #[error("Nothing staged to commit")]
    NothingStaged,

    /// Failed to push
    #[error("Failed to push to remote: {0}")]
    PushFailed(String),

    /// Remote not found
    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Failed to parse version
    #[error("Failed to parse version '{0}': {1}")]
    ParseFailed(String, String),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Changelog file not found
    #[error("Changelog file not found at {0}")]
    FileNotFound(PathBuf),

    /// No recorded release commit in an existing changelog
    #[error("No recorded commit marker found in {0}; the changelog is unusable")]
    NoRecordedCommit(PathBuf),

    /// Failed to write changelog
    #[error("Failed to write changelog: {0}")]
    WriteFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Manifest-related errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No owning project found walking up from the start directory
    #[error("No package.json found in {0} or any parent directory")]
    ProjectNotFound(PathBuf),

    /// Package manifest not found
    #[error("Package manifest not found at {0}")]
    NotFound(PathBuf),

    /// Failed to parse manifest
    #[error("Failed to parse manifest: {0}")]
    ParseError(String),

    /// Failed to update manifest
    #[error("Failed to update manifest: {0}")]
    UpdateError(String),
}

/// Release-flow errors
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Working tree has local modifications
    #[error("Unable to create a release with local changes to: {}", .0.join(", "))]
    DirtyWorkingTree(Vec<String>),

    /// Missing GitHub credential
    #[error("GITHUB_TOKEN environment variable is not set")]
    MissingToken,

    /// Remote origin does not point at a supported host
    #[error("Unable to parse a GitHub repository from remote URL: {0}")]
    UnsupportedRemote(String),

    /// GitHub release publication failed
    #[error("Failed to publish GitHub release: {0}")]
    PublishFailed(String),
}

impl GantryError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
