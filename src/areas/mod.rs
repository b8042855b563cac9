//! Core repository components
//!
//! - `database`: content-addressed object store for blobs and commits
//! - `index`: staging area
//! - `refs`: HEAD and branch pointers
//! - `repository`: owns every area and runs the commands
//! - `storage`: file system capability the other areas go through
//! - `workspace`: working tree listing and reconcile

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod storage;
pub mod workspace;
