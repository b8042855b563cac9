//! Command implementations
//!
//! Each command is a method on [`crate::areas::repository::Repository`] that
//! writes its human-readable report to the repository writer.

pub mod porcelain;
