//! Exit codes for the CLI

use gantry_core::error::{ChangelogError, GantryError, GitError, ReleaseError, VersionError};

/// General error
pub const ERROR: i32 = 1;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Version error
pub const VERSION_ERROR: i32 = 4;

/// Release precondition not met (dirty working tree)
pub const PRECONDITION_ERROR: i32 = 5;

/// Existing changelog is unusable
pub const CHANGELOG_ERROR: i32 = 6;

/// Map an error chain to an exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(gantry) = cause.downcast_ref::<GantryError>() {
            return match gantry {
                GantryError::Release(release) => release_code(release),
                GantryError::Changelog(_) => CHANGELOG_ERROR,
                GantryError::Version(_) => VERSION_ERROR,
                GantryError::Git(_) => GIT_ERROR,
                _ => ERROR,
            };
        }
        if let Some(release) = cause.downcast_ref::<ReleaseError>() {
            return release_code(release);
        }
        if cause.downcast_ref::<ChangelogError>().is_some() {
            return CHANGELOG_ERROR;
        }
        if cause.downcast_ref::<VersionError>().is_some() {
            return VERSION_ERROR;
        }
        if cause.downcast_ref::<GitError>().is_some() {
            return GIT_ERROR;
        }
    }

    ERROR
}

fn release_code(err: &ReleaseError) -> i32 {
    match err {
        ReleaseError::DirtyWorkingTree(_) => PRECONDITION_ERROR,
        _ => ERROR,
    }
}
