//! Repository error kinds
//!
//! Every failure a command can run into is one of these variants. They travel
//! inside `anyhow::Error` like any other error in the crate, so command code
//! keeps using `?` and callers that care can still `downcast_ref` to inspect
//! the kind.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("not a minigit repository (run `minigit init` first)")]
    RepoNotInitialized,

    /// A file, branch or commit named by the user does not exist.
    #[error("'{0}' did not match any file, branch or commit")]
    TargetNotFound(String),

    #[error("a branch named '{0}' already exists")]
    BranchExists(String),

    #[error("no commits yet, create a commit first")]
    NoCommitsYet,

    #[error("branch '{0}' has no commits yet")]
    BranchHasNoCommits(String),

    #[error("invalid branch name '{0}'")]
    InvalidBranchName(String),

    #[error("blob {oid} for '{path}' is missing from the object store")]
    BlobMissing { path: String, oid: ObjectId },

    #[error("nothing to commit, the staging area is empty")]
    NothingToCommit,

    #[error("no common ancestor between HEAD and '{0}'")]
    NoCommonAncestor(String),

    /// Paths end up in space separated and `name=hash` comma separated
    /// records, so those characters cannot be represented.
    #[error("unsupported path '{0}': paths may not contain spaces, ',', '=' or newlines")]
    UnsupportedPath(String),

    #[error("I/O failure on {path}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RepositoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RepositoryError::IoFailure {
            path: path.into(),
            source,
        }
    }
}
