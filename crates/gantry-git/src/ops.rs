//! Staging, commit and tag creation

use std::path::Path;

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};
use gantry_core::error::GitError;

impl GitRepo {
    /// Stage the given paths (relative to the repository workdir)
    #[instrument(skip(self, paths), fields(count = paths.len()))]
    pub fn stage(&self, paths: &[&Path]) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(path)?;
        }
        index.write()?;
        info!(count = paths.len(), "staged paths");
        Ok(())
    }

    /// Check whether the index differs from the HEAD tree
    pub fn has_staged_changes(&self) -> Result<bool> {
        let statuses = self.repo.statuses(None)?;

        for entry in statuses.iter() {
            let status = entry.status();
            if status.is_index_new()
                || status.is_index_modified()
                || status.is_index_deleted()
                || status.is_index_renamed()
                || status.is_index_typechange()
            {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Commit the currently staged tree, returning the new commit hash
    #[instrument(skip(self), fields(message))]
    pub fn commit(&self, message: &str) -> Result<String> {
        let sig = self.repo.signature()?;

        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                None
            }
            Err(e) => return Err(GitError::Git2(e)),
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        info!(hash = %oid, "created commit");
        Ok(oid.to_string())
    }

    /// Create a tag pointing at HEAD
    ///
    /// With a message, an annotated tag is created; without, a lightweight
    /// one.
    #[instrument(skip(self), fields(name, annotated = message.is_some()))]
    pub fn create_tag(&self, name: &str, message: Option<&str>) -> Result<()> {
        let tag_ref = format!("refs/tags/{}", name);
        if self.repo.find_reference(&tag_ref).is_ok() {
            return Err(GitError::TagExists(name.to_string()));
        }

        let head = self.head_commit()?;

        if let Some(msg) = message {
            let sig = self.repo.signature()?;
            self.repo.tag(name, head.as_object(), &sig, msg, false)?;
        } else {
            self.repo.tag_lightweight(name, head.as_object(), false)?;
        }

        info!(name, annotated = message.is_some(), "created tag");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    fn setup_repo() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        // git2 needs a configured identity for Repository::signature
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        let sig = Signature::now("Test", "test@example.com").unwrap();
        std::fs::write(temp.path().join("file.txt"), "content").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("file.txt")).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_stage_and_commit() {
        let (temp, repo) = setup_repo();

        std::fs::write(temp.path().join("new.txt"), "new content").unwrap();
        repo.stage(&[Path::new("new.txt")]).unwrap();
        assert!(repo.has_staged_changes().unwrap());

        let hash = repo.commit("feat: add new file").unwrap();
        assert_eq!(hash.len(), 40);

        let commits = repo.all_commits().unwrap();
        assert_eq!(commits[0].message, "feat: add new file");
        assert!(!repo.has_staged_changes().unwrap());
    }

    #[test]
    fn test_create_tag() {
        let (_temp, repo) = setup_repo();
        repo.create_tag("v1.0.0", None).unwrap();

        let result = repo.create_tag("v1.0.0", None);
        assert!(matches!(result, Err(GitError::TagExists(_))));
    }

    #[test]
    fn test_create_annotated_tag() {
        let (_temp, repo) = setup_repo();
        repo.create_tag("v2.0.0", Some("Release 2.0.0")).unwrap();
        assert!(repo.repo.find_reference("refs/tags/v2.0.0").is_ok());
    }
}
