//! Interactive conventional-commit flow

use console::style;
use dialoguer::{Confirm, Input, Select};
use tracing::info;

use gantry_core::error::GitError;
use gantry_core::types::CommitTypes;
use gantry_git::GitRepo;

use crate::cli::{output, Cli};

/// Run the interactive commit flow
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let repo = GitRepo::discover(&cwd)?;

    if !repo.has_staged_changes()? {
        return Err(GitError::NothingStaged.into());
    }

    let types = CommitTypes::conventional();

    let choices: Vec<String> = types
        .iter()
        .map(|t| format!("{} - {}", style(&t.label).cyan(), t.description))
        .collect();

    let selected = Select::new()
        .with_prompt("What type of change are you committing?")
        .items(&choices)
        .max_length(types.len())
        .default(0)
        .interact()?;
    let commit_type = types
        .iter()
        .nth(selected)
        .map(|t| t.key.clone())
        .unwrap_or_else(|| "chore".to_string());

    let description: String = Input::new()
        .with_prompt("Write a brief description of the change")
        .interact_text()?;

    let has_issue = Confirm::new()
        .with_prompt("Does this change affect any open issues?")
        .default(false)
        .interact()?;

    let issue_suffix = if has_issue {
        let issue_number: u64 = Input::new()
            .with_prompt("Enter the issue number this change is associated with")
            .interact_text()?;
        format!(" (#{})", issue_number)
    } else {
        String::new()
    };

    let message = format!("{}: {}{}", commit_type, description, issue_suffix);

    let hash = repo.commit(&message)?;
    info!(%hash, %message, "created conventional commit");

    if !cli.quiet {
        output::success(&format!("Committed: {}", message));
    }

    Ok(())
}
