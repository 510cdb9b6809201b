//! Release flow orchestration
//!
//! Sequences the release as an ordered pipeline of fallible steps:
//! clean-tree precondition, changelog bootstrap or incremental update,
//! version write-back, release commit, push, tag, tag push, and the
//! optional GitHub release note. Every step up to the push is fatal on
//! failure; the GitHub note is reported-and-continue because the local
//! release already stands.

use std::path::Path;

use tracing::{info, warn};

use gantry_adapters::ProjectManifest;
use gantry_changelog::{ChangelogDocument, UpdateOutcome};
use gantry_core::error::{ChangelogError, ReleaseError};
use gantry_core::types::CommitTypes;
use gantry_git::{git_push, git_push_tag, GitRepo};

use crate::cli::{output, Cli};
use crate::github::{GitHubClient, RepoSlug};

/// Remote used for pushes and for the GitHub slug lookup
const REMOTE: &str = "origin";

/// Run the release flow
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let manifest = ProjectManifest::discover(&cwd)?;
    let repo = GitRepo::discover(manifest.dir())?;

    // There can be no local modifications when performing a release
    let modified = repo.modified_files()?;
    if !modified.is_empty() {
        return Err(ReleaseError::DirtyWorkingTree(modified).into());
    }

    let types = CommitTypes::conventional();
    let changelog = ChangelogDocument::new(manifest.dir(), &types);
    let current_version = manifest.read_version()?;

    info!(
        %current_version,
        force_major = cli.major,
        changelog_exists = changelog.exists(),
        "starting release"
    );

    // Create or update the changelog
    let (version, body) = if changelog.exists() {
        let Some(marker) = changelog.last_recorded_commit()? else {
            return Err(
                ChangelogError::NoRecordedCommit(changelog.path().to_path_buf()).into(),
            );
        };

        let commits = repo.commits_since(&marker)?;
        match changelog.incremental_update(&commits, cli.major, &current_version)? {
            UpdateOutcome::Updated(update) => {
                manifest.write_version(&update.version)?;
                if !cli.quiet {
                    output::success(&format!(
                        "Updated {} ({} bump)",
                        changelog.path().display(),
                        update.bump
                    ));
                }
                (update.version, update.section)
            }
            UpdateOutcome::EmptyChangeSet => {
                if !cli.quiet {
                    output::info("No releasable changes since the last release.");
                }
                return Ok(());
            }
            UpdateOutcome::UnusableDocument => {
                return Err(
                    ChangelogError::NoRecordedCommit(changelog.path().to_path_buf()).into(),
                );
            }
        }
    } else {
        let commits = repo.all_commits()?;
        let text = changelog.bootstrap(&current_version, &commits)?;
        if !cli.quiet {
            output::success(&format!("Created {}", changelog.path().display()));
        }
        (current_version.clone(), text)
    };

    // Commit the changelog and manifest, push, then tag the release
    let workdir = match repo.workdir() {
        Some(w) => w.to_path_buf(),
        None => anyhow::bail!("repository has no working directory"),
    };
    repo.stage(&[
        rel_to(&workdir, changelog.path()),
        rel_to(&workdir, manifest.path()),
    ])?;
    repo.commit(&format!("release: v{}", version))?;

    let branch = repo
        .current_branch()?
        .unwrap_or_else(|| "HEAD".to_string());
    git_push(REMOTE, &branch)?;

    let tag = format!("v{}", version);
    repo.create_tag(&tag, None)?;
    git_push_tag(REMOTE, &tag)?;

    if !cli.quiet {
        output::success(&format!("Released version {}", version));
    }

    // The GitHub note is best-effort: the local release already stands
    // and is not rolled back when publication fails.
    if cli.github_release {
        match publish_release_note(&repo, &tag, &body) {
            Ok(()) => {
                if !cli.quiet {
                    output::success(&format!("Published GitHub release {}", tag));
                }
            }
            Err(err) => {
                warn!(error = %err, "GitHub release publication failed");
                output::warning(&format!("GitHub release skipped: {:#}", err));
            }
        }
    }

    Ok(())
}

fn rel_to<'a>(workdir: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(workdir).unwrap_or(path)
}

fn publish_release_note(repo: &GitRepo, tag: &str, body: &str) -> anyhow::Result<()> {
    let client = GitHubClient::from_env()?;

    let url = repo
        .remote_url(REMOTE)?
        .ok_or_else(|| ReleaseError::UnsupportedRemote(format!("{} has no URL", REMOTE)))?;
    let slug = RepoSlug::from_remote_url(&url)
        .ok_or_else(|| ReleaseError::UnsupportedRemote(url.clone()))?;

    client.publish_release(&slug, tag, body)?;
    Ok(())
}
