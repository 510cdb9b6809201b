//! Remote operations

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};
use gantry_core::error::GitError;

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }
}

/// Push a branch using the git CLI
///
/// Shelling out keeps credential handling in git's hands, which is far
/// more reliable than driving libgit2 transports from here.
#[instrument(fields(remote, branch))]
pub fn git_push(remote: &str, branch: &str) -> Result<()> {
    run_push(&["push", remote, branch])
}

/// Push a tag using the git CLI
#[instrument(fields(remote, tag))]
pub fn git_push_tag(remote: &str, tag: &str) -> Result<()> {
    run_push(&["push", remote, tag])
}

fn run_push(args: &[&str]) -> Result<()> {
    let start = std::time::Instant::now();
    let output = std::process::Command::new("git")
        .args(args)
        .output()
        .map_err(|e| GitError::PushFailed(e.to_string()))?;

    info!(
        args = ?args,
        duration_ms = start.elapsed().as_millis(),
        success = output.status.success(),
        "git push (CLI)"
    );

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::PushFailed(stderr.trim().to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository;
    use tempfile::TempDir;

    #[test]
    fn test_remote_not_found() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();

        let result = repo.remote_url("nonexistent");
        assert!(matches!(result, Err(GitError::RemoteNotFound(_))));
    }

    #[test]
    fn test_remote_url() {
        let temp = TempDir::new().unwrap();
        let git2_repo = Repository::init(temp.path()).unwrap();
        git2_repo
            .remote("origin", "git@github.com:example/gantry.git")
            .unwrap();

        let repo = GitRepo::open(temp.path()).unwrap();
        let url = repo.remote_url("origin").unwrap();
        assert_eq!(url.as_deref(), Some("git@github.com:example/gantry.git"));
    }
}
