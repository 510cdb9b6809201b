//! Gantry Changelog - changelog derivation and maintenance
//!
//! This crate turns raw commit history into a well-formed `CHANGELOG.md`:
//! it classifies commits (dropping merge noise and the tool's own release
//! commits), renders each surviving commit into one changelog line, and
//! manages the document across its lifecycle - bootstrap from full
//! history, then incremental top-prepends per release.

pub mod classifier;
pub mod document;
pub mod formatter;

pub use document::{ChangelogDocument, UpdateOutcome, UpdatedChangelog};
pub use formatter::CommitFormatter;
