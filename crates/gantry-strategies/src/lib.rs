//! Gantry Strategies - version calculation for the release flow
//!
//! This crate computes the next semantic version from the current one and
//! a bump type derived from commit history.

mod semver;
mod traits;
pub mod types;

pub use semver::SemVerStrategy;
pub use traits::VersionStrategy;
pub use types::VersionComponents;
