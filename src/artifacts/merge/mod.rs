//! Merge support
//!
//! - `lca_finder`: merge base search over single-parent history
//! - `resolution`: per-file three-way decisions and conflict markers

use crate::artifacts::objects::object_id::ObjectId;

pub mod lca_finder;
pub mod resolution;

/// How a merge ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Both tips are the same commit; nothing was done
    UpToDate,
    /// Merge commit created
    Merged(ObjectId),
    /// Conflict markers written for these files and no commit made
    Conflicted(Vec<String>),
}
