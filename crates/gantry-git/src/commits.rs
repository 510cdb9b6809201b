//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::Sort;

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Get all commits on the current branch, newest first
    pub fn all_commits(&self) -> Result<Vec<CommitInfo>> {
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_to_info(&commit));
        }

        Ok(commits)
    }

    /// Get commits strictly newer than a revision, newest first
    ///
    /// The revision itself and everything older is excluded. Accepts any
    /// revision string git can resolve, including a 7-character short hash.
    pub fn commits_since(&self, since: &str) -> Result<Vec<CommitInfo>> {
        let since_oid = self.repo.revparse_single(since)?.id();
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;
        revwalk.hide(since_oid)?;

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_to_info(&commit));
        }

        Ok(commits)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let hash = commit.id().to_string();
    let author = commit.author();

    let message = commit.summary().unwrap_or("(no message)").to_string();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    CommitInfo::new(hash, message, author.name().unwrap_or("Unknown"), timestamp)
}
