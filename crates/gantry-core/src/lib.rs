//! Gantry Core - shared types and errors for the Gantry release helper
//!
//! This crate holds the error hierarchy and the commit-type registry
//! shared by every other Gantry crate.

pub mod error;
pub mod types;

pub use error::{GantryError, Result};
pub use types::{BumpType, CommitTypeInfo, CommitTypes};
