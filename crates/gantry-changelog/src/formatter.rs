//! Commit line formatting
//!
//! Renders one commit into one changelog line:
//! `- <message> [<short-hash>]\n`, with the recognized type prefix wrapped
//! in bold markup and VCS decoration suffixes stripped.

use std::sync::LazyLock;

use regex::Regex;

use gantry_core::types::CommitTypes;
use gantry_git::CommitInfo;

/// Trailing ref decorations like " (HEAD -> master, origin/master)" that
/// git appends to decorated log output.
static ARTIFACT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\((HEAD|origin)[^)]+\)$").expect("Invalid regex"));

/// Formats commits into changelog lines
pub struct CommitFormatter {
    type_prefix: Regex,
}

impl CommitFormatter {
    /// Create a formatter recognizing the given commit-type registry
    pub fn new(types: &CommitTypes) -> Self {
        let alternation = types
            .keys()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        let type_prefix =
            Regex::new(&format!("^({}):", alternation)).expect("Invalid regex");

        Self { type_prefix }
    }

    /// Render a single commit into one changelog line
    ///
    /// Never fails: messages without a recognized type prefix pass through
    /// unstyled.
    pub fn format(&self, commit: &CommitInfo) -> String {
        let clean = ARTIFACT_REGEX.replace(&commit.message, "");
        let styled = self
            .type_prefix
            .replace(&clean, |caps: &regex::Captures<'_>| {
                format!("__{}__", &caps[0])
            });

        format!("- {} [{}]\n", styled, commit.short_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const SAMPLE_HASH: &str = "8c52e96efb2b63409dec89adb605739ca579f77c";

    fn make_commit(message: &str) -> CommitInfo {
        CommitInfo::new(SAMPLE_HASH, message, "Test Author", Utc::now())
    }

    fn formatter() -> CommitFormatter {
        CommitFormatter::new(&CommitTypes::conventional())
    }

    #[test]
    fn test_format_sample_line() {
        let line = formatter().format(&make_commit("refactor: Updated docs; updated deps"));
        assert_eq!(
            line,
            "- __refactor:__ Updated docs; updated deps [8c52e96]\n"
        );
    }

    #[test]
    fn test_strips_ref_decorations() {
        let line = formatter().format(&make_commit(
            "fix: handle empty input (HEAD -> master, origin/master)",
        ));
        assert_eq!(line, "- __fix:__ handle empty input [8c52e96]\n");

        let line = formatter().format(&make_commit("chore: tidy (origin/main)"));
        assert_eq!(line, "- __chore:__ tidy [8c52e96]\n");
    }

    #[test]
    fn test_unrecognized_prefix_passes_through() {
        let line = formatter().format(&make_commit("Just a plain message"));
        assert_eq!(line, "- Just a plain message [8c52e96]\n");

        let line = formatter().format(&make_commit("wip: not a known type"));
        assert_eq!(line, "- wip: not a known type [8c52e96]\n");
    }

    #[test]
    fn test_emphasis_covers_only_the_prefix() {
        let line = formatter().format(&make_commit("feat: feat: twice"));
        assert_eq!(line, "- __feat:__ feat: twice [8c52e96]\n");
    }

    #[test]
    fn test_short_hash_round_trip() {
        let line = formatter().format(&make_commit("docs: describe things"));
        let bracketed = line
            .rsplit_once('[')
            .and_then(|(_, rest)| rest.strip_suffix("]\n"))
            .unwrap();
        assert_eq!(bracketed, &SAMPLE_HASH[..7]);
    }

    #[test]
    fn test_mid_message_decoration_is_kept() {
        let line = formatter().format(&make_commit("fix: keep (origin notes) intact here"));
        assert_eq!(line, "- __fix:__ keep (origin notes) intact here [8c52e96]\n");
    }
}
