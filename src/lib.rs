//! A minimal content-addressed version control system
//!
//! - `areas`: the on-disk parts of a repository (object store, refs, staging
//!   area, working tree) and the [`areas::repository::Repository`] owning them
//! - `artifacts`: values and algorithms those areas work with
//! - `commands`: one `Repository` method per CLI command
//! - `errors`: failure kinds shared by every command

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
