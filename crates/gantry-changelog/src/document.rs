//! Changelog document management
//!
//! The document is plain markdown with a fixed layout:
//!
//! ```text
//! # Changelog
//!
//! ## v1.3.0
//!
//! - __feat:__ add widget [8c52e96]
//! ...
//! ```
//!
//! The title line appears exactly once at the top. Release sections are
//! newest-first; updates only ever insert a new section directly after
//! the title, leaving everything below byte-for-byte intact. The trailing
//! `[xxxxxxx]` token on each line doubles as the parse anchor for finding
//! where the next incremental window starts.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, instrument};

use gantry_core::error::{ChangelogError, Result};
use gantry_core::types::{BumpType, CommitTypes};
use gantry_git::CommitInfo;
use gantry_strategies::{SemVerStrategy, VersionStrategy};

use crate::classifier;
use crate::formatter::CommitFormatter;

/// Document title marker, first line of every changelog
pub const DOCUMENT_TITLE: &str = "# Changelog";

/// Default file name next to the project manifest
pub const DEFAULT_FILE_NAME: &str = "CHANGELOG.md";

/// First bracketed 7-character token at end of a line, i.e. the most
/// recent commit recorded in the newest release section.
static LAST_COMMIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([a-z0-9]{7})\]\n").expect("Invalid regex"));

/// Heading line for one release section
fn release_heading(version: &str) -> String {
    format!("## v{}", version)
}

/// Result of an incremental update attempt
#[derive(Debug)]
pub enum UpdateOutcome {
    /// A new release section was written
    Updated(UpdatedChangelog),
    /// Every candidate commit was filtered out; nothing written
    EmptyChangeSet,
    /// The existing document carries no recoverable commit marker; the
    /// caller decides whether that is fatal
    UnusableDocument,
}

/// A successfully written incremental update
#[derive(Debug)]
pub struct UpdatedChangelog {
    /// Full document text as persisted
    pub text: String,
    /// The rendered lines of the new release section
    pub section: String,
    /// Bump category derived from the change set
    pub bump: BumpType,
    /// The new version recorded in the section heading
    pub version: String,
}

/// Owns the changelog file's lifecycle
pub struct ChangelogDocument {
    path: PathBuf,
    formatter: CommitFormatter,
    strategy: SemVerStrategy,
}

impl ChangelogDocument {
    /// Manage the changelog in the given project directory
    pub fn new(project_dir: &Path, types: &CommitTypes) -> Self {
        Self {
            path: project_dir.join(DEFAULT_FILE_NAME),
            formatter: CommitFormatter::new(types),
            strategy: SemVerStrategy::new(),
        }
    }

    /// Path of the managed document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a changelog document is present
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the full document text
    pub fn read(&self) -> std::result::Result<String, ChangelogError> {
        if !self.exists() {
            return Err(ChangelogError::FileNotFound(self.path.clone()));
        }
        Ok(std::fs::read_to_string(&self.path)?)
    }

    /// Find the most recent commit recorded in the document
    ///
    /// Scans for the first bracketed short-hash token; `None` means the
    /// document has no usable entry and cannot anchor an incremental
    /// update.
    pub fn last_recorded_commit(&self) -> std::result::Result<Option<String>, ChangelogError> {
        let text = self.read()?;
        Ok(LAST_COMMIT_REGEX
            .captures(&text)
            .map(|caps| caps[1].to_string()))
    }

    /// Create a brand-new changelog from the entire commit history
    ///
    /// Writes a single release section for `version` containing one line
    /// per included commit, newest first, and returns the document text.
    /// Any existing content at the path is replaced.
    #[instrument(skip(self, commits), fields(version, commit_count = commits.len()))]
    pub fn bootstrap(
        &self,
        version: &str,
        commits: &[CommitInfo],
    ) -> std::result::Result<String, ChangelogError> {
        let mut contents = format!("{}\n\n{}\n\n", DOCUMENT_TITLE, release_heading(version));

        let mut included = 0usize;
        for commit in commits {
            if !classifier::is_included(&commit.message) {
                continue;
            }
            contents.push_str(&self.formatter.format(commit));
            included += 1;
        }

        self.write_atomic(&contents)?;
        info!(version, included, path = %self.path.display(), "bootstrapped changelog");
        Ok(contents)
    }

    /// Prepend a new release section for the given change set
    ///
    /// `commits` must be the history strictly newer than the most recent
    /// recorded commit (see [`Self::last_recorded_commit`]), newest
    /// first; this manager never calls into version control itself.
    ///
    /// The bump category defaults to patch, upgrades to minor when the
    /// change set contains a feature commit, and is forced to major when
    /// `force_major` is set. The new version is computed from
    /// `current_version`; persisting it back to project metadata is the
    /// caller's job.
    #[instrument(skip(self, commits), fields(commit_count = commits.len(), force_major))]
    pub fn incremental_update(
        &self,
        commits: &[CommitInfo],
        force_major: bool,
        current_version: &str,
    ) -> Result<UpdateOutcome> {
        let text = self.read()?;

        // An existing document without a recoverable marker (or without
        // the title line to splice under) is unusable; never fabricate a
        // starting point for it.
        let Some(title_at) = text.find(DOCUMENT_TITLE) else {
            return Ok(UpdateOutcome::UnusableDocument);
        };
        if !LAST_COMMIT_REGEX.is_match(&text) {
            return Ok(UpdateOutcome::UnusableDocument);
        }

        let included: Vec<&CommitInfo> = commits
            .iter()
            .filter(|c| classifier::is_included(&c.message))
            .collect();

        if included.is_empty() {
            debug!("no includable commits since last release");
            return Ok(UpdateOutcome::EmptyChangeSet);
        }

        let mut bump = BumpType::Patch;
        if included.iter().any(|c| classifier::is_feature(&c.message)) {
            bump = BumpType::Minor;
        }
        if force_major {
            bump = BumpType::Major;
        }

        let version = self.strategy.bump_version(current_version, bump)?;

        let mut section = String::new();
        for commit in &included {
            section.push_str(&self.formatter.format(commit));
        }

        // Splice the new section directly after the title, reattaching
        // everything that followed it verbatim.
        let remainder = &text[title_at + DOCUMENT_TITLE.len()..];
        let updated = format!(
            "{}\n\n{}\n\n{}{}",
            DOCUMENT_TITLE,
            release_heading(&version),
            section,
            remainder
        );

        self.write_atomic(&updated)?;

        info!(
            %version,
            %bump,
            entries = included.len(),
            path = %self.path.display(),
            "updated changelog"
        );

        Ok(UpdateOutcome::Updated(UpdatedChangelog {
            text: updated,
            section,
            bump,
            version,
        }))
    }

    /// All-or-nothing write: stage to a sibling temp file, then rename
    /// over the target.
    fn write_atomic(&self, contents: &str) -> std::result::Result<(), ChangelogError> {
        let tmp = self.path.with_extension("md.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| ChangelogError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn make_commit(hash: &str, message: &str) -> CommitInfo {
        CommitInfo::new(hash, message, "Test Author", Utc::now())
    }

    fn document(dir: &Path) -> ChangelogDocument {
        ChangelogDocument::new(dir, &CommitTypes::conventional())
    }

    fn history() -> Vec<CommitInfo> {
        vec![
            make_commit(
                "8c52e96efb2b63409dec89adb605739ca579f77c",
                "refactor: Updated docs; updated deps",
            ),
            make_commit(
                "1a2b3c4d5e6f7890aabbccddeeff001122334455",
                "Merge pull request #7 from fork/topic",
            ),
            make_commit(
                "f00dbeefcafe0123456789abcdef012345678901",
                "feat: initial release",
            ),
        ]
    }

    #[test]
    fn test_bootstrap_layout() {
        let temp = TempDir::new().unwrap();
        let doc = document(temp.path());

        let text = doc.bootstrap("1.0.0", &history()).unwrap();

        assert!(doc.exists());
        assert_eq!(std::fs::read_to_string(doc.path()).unwrap(), text);
        assert_eq!(
            text,
            "# Changelog\n\n## v1.0.0\n\n\
             - __refactor:__ Updated docs; updated deps [8c52e96]\n\
             - __feat:__ initial release [f00dbee]\n"
        );
    }

    #[test]
    fn test_bootstrap_then_reparse() {
        let temp = TempDir::new().unwrap();
        let doc = document(temp.path());

        doc.bootstrap("1.0.0", &history()).unwrap();

        // The newest included commit's short hash is the recorded marker
        let marker = doc.last_recorded_commit().unwrap();
        assert_eq!(marker.as_deref(), Some("8c52e96"));
    }

    #[test]
    fn test_incremental_update_prepends_and_preserves_tail() {
        let temp = TempDir::new().unwrap();
        let doc = document(temp.path());

        let old = doc.bootstrap("1.0.0", &history()).unwrap();
        let new_commits = vec![
            make_commit(
                "abc1234567890abcdef1234567890abcdef12345",
                "fix: plug a leak",
            ),
            make_commit(
                "def4567890abcdef1234567890abcdef12345678",
                "chore: bump deps",
            ),
        ];

        let outcome = doc.incremental_update(&new_commits, false, "1.0.0").unwrap();
        let updated = match outcome {
            UpdateOutcome::Updated(u) => u,
            other => panic!("expected update, got {:?}", other),
        };

        assert_eq!(updated.bump, BumpType::Patch);
        assert_eq!(updated.version, "1.0.1");
        assert!(updated.text.starts_with("# Changelog\n\n## v1.0.1\n\n"));

        // Everything after the old title line survives byte-for-byte
        let old_tail = &old[DOCUMENT_TITLE.len()..];
        assert!(updated.text.ends_with(old_tail));

        // And the new section sits between the heading and the old tail
        assert_eq!(
            updated.section,
            "- __fix:__ plug a leak [abc1234]\n- __chore:__ bump deps [def4567]\n"
        );
    }

    #[test]
    fn test_empty_change_set_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        let doc = document(temp.path());

        let old = doc.bootstrap("1.0.0", &history()).unwrap();
        let noise = vec![
            make_commit(
                "abc1234567890abcdef1234567890abcdef12345",
                "Merge pull request #9 from fork/topic",
            ),
            make_commit(
                "def4567890abcdef1234567890abcdef12345678",
                "release: v1.0.0",
            ),
        ];

        let outcome = doc.incremental_update(&noise, false, "1.0.0").unwrap();
        assert!(matches!(outcome, UpdateOutcome::EmptyChangeSet));
        assert_eq!(doc.read().unwrap(), old);
    }

    #[test]
    fn test_feature_commit_triggers_minor() {
        let temp = TempDir::new().unwrap();
        let doc = document(temp.path());
        doc.bootstrap("1.2.3", &history()).unwrap();

        let commits = vec![
            make_commit(
                "abc1234567890abcdef1234567890abcdef12345",
                "fix: plug a leak",
            ),
            make_commit(
                "def4567890abcdef1234567890abcdef12345678",
                "feat: grow a widget",
            ),
        ];

        let outcome = doc.incremental_update(&commits, false, "1.2.3").unwrap();
        let updated = match outcome {
            UpdateOutcome::Updated(u) => u,
            other => panic!("expected update, got {:?}", other),
        };
        assert_eq!(updated.bump, BumpType::Minor);
        assert_eq!(updated.version, "1.3.0");
    }

    #[test]
    fn test_force_major_takes_precedence() {
        let temp = TempDir::new().unwrap();
        let doc = document(temp.path());
        doc.bootstrap("1.2.3", &history()).unwrap();

        let commits = vec![make_commit(
            "def4567890abcdef1234567890abcdef12345678",
            "feat: grow a widget",
        )];

        let outcome = doc.incremental_update(&commits, true, "1.2.3").unwrap();
        let updated = match outcome {
            UpdateOutcome::Updated(u) => u,
            other => panic!("expected update, got {:?}", other),
        };
        assert_eq!(updated.bump, BumpType::Major);
        assert_eq!(updated.version, "2.0.0");
    }

    #[test]
    fn test_unusable_document_without_marker() {
        let temp = TempDir::new().unwrap();
        let doc = document(temp.path());

        std::fs::write(doc.path(), "# Changelog\n\nhand-written notes, no entries\n").unwrap();

        assert_eq!(doc.last_recorded_commit().unwrap(), None);

        let commits = vec![make_commit(
            "abc1234567890abcdef1234567890abcdef12345",
            "fix: plug a leak",
        )];
        let outcome = doc.incremental_update(&commits, false, "1.0.0").unwrap();
        assert!(matches!(outcome, UpdateOutcome::UnusableDocument));
    }

    #[test]
    fn test_malformed_version_fails_fast() {
        let temp = TempDir::new().unwrap();
        let doc = document(temp.path());
        doc.bootstrap("1.0.0", &history()).unwrap();

        let commits = vec![make_commit(
            "abc1234567890abcdef1234567890abcdef12345",
            "fix: plug a leak",
        )];
        let result = doc.incremental_update(&commits, false, "not-a-version");
        assert!(result.is_err());
        // No partial write happened
        assert_eq!(
            doc.last_recorded_commit().unwrap().as_deref(),
            Some("8c52e96")
        );
    }

    #[test]
    fn test_repeated_updates_stack_newest_first() {
        let temp = TempDir::new().unwrap();
        let doc = document(temp.path());
        doc.bootstrap("1.0.0", &history()).unwrap();

        let first = vec![make_commit(
            "abc1234567890abcdef1234567890abcdef12345",
            "fix: plug a leak",
        )];
        doc.incremental_update(&first, false, "1.0.0").unwrap();

        let second = vec![make_commit(
            "def4567890abcdef1234567890abcdef12345678",
            "feat: grow a widget",
        )];
        let outcome = doc.incremental_update(&second, false, "1.0.1").unwrap();
        let updated = match outcome {
            UpdateOutcome::Updated(u) => u,
            other => panic!("expected update, got {:?}", other),
        };

        assert_eq!(updated.version, "1.1.0");
        let text = doc.read().unwrap();
        let v110 = text.find("## v1.1.0").unwrap();
        let v101 = text.find("## v1.0.1").unwrap();
        let v100 = text.find("## v1.0.0").unwrap();
        assert!(v110 < v101 && v101 < v100);
        assert_eq!(
            doc.last_recorded_commit().unwrap().as_deref(),
            Some("def4567")
        );
    }
}
