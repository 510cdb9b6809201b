//! Commit classification
//!
//! Decides which commits appear in the changelog and which ones signal a
//! feature-level version bump. Classification is pure: it looks only at
//! the message string.

use std::sync::LazyLock;

use regex::Regex;

/// Messages matching one of these prefixes are noise: merge bookkeeping
/// and the tool's own release commits. Matched case-insensitively.
static BLACKLIST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Merge pull request|Merge remote-tracking branch|release: v)")
        .expect("Invalid regex")
});

/// A feature commit starts with the reserved "feat:" prefix.
static FEATURE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^feat:").expect("Invalid regex"));

/// Check if a commit message should appear in the changelog
pub fn is_included(message: &str) -> bool {
    !BLACKLIST_REGEX.is_match(message)
}

/// Check if a commit message signals a feature-level (minor) bump
pub fn is_feature(message: &str) -> bool {
    FEATURE_REGEX.is_match(message)
}
