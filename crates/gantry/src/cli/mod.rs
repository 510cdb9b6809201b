//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::Parser;

/// Gantry - conventional-commit release helper
///
/// With `--commit`, interactively builds a conventional commit from the
/// staged changes. With `--release`, derives the next version from the
/// commit history, updates the changelog, and commits, tags and pushes
/// the release.
#[derive(Debug, Parser)]
#[command(name = "gantry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Create a conventional commit interactively
    #[arg(long)]
    pub commit: bool,

    /// Perform a release
    #[arg(long)]
    pub release: bool,

    /// Force a major version bump (with --release)
    #[arg(long)]
    pub major: bool,

    /// Publish a GitHub release note after releasing (needs GITHUB_TOKEN)
    #[arg(long)]
    pub github_release: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,
}

impl Cli {
    /// Execute the selected flow(s)
    pub fn execute(&self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        if !self.commit && !self.release {
            output::info("Nothing to do. Pass --commit or --release.");
            return Ok(());
        }

        if self.commit {
            commands::commit::run(self)?;
        }

        if self.release {
            commands::release::run(self)?;
        }

        Ok(())
    }
}
