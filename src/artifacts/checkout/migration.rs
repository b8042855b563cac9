//! Checkout reconcile plan
//!
//! Moving the working tree to a commit happens in two phases:
//!
//! 1. delete every working tree file the target commit does not track, then
//!    prune directories those deletions left empty
//! 2. write every file of the target commit from its blob
//!
//! Deleting first means a path can switch between file and directory, and
//! the working tree ends up holding exactly the target's files whenever all
//! blobs are present.

use crate::artifacts::objects::commit::FileTable;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    deletions: BTreeSet<String>,
    restores: FileTable,
    rmdirs: BTreeSet<String>,
}

impl Migration {
    pub fn plan<'f>(workspace_files: impl IntoIterator<Item = &'f String>, target: &FileTable) -> Self {
        let deletions = workspace_files
            .into_iter()
            .filter(|name| !target.contains_key(*name))
            .cloned()
            .collect::<BTreeSet<_>>();

        let rmdirs = deletions
            .iter()
            .flat_map(|name| parent_dirs(name))
            .collect::<BTreeSet<_>>();

        Migration {
            deletions,
            restores: target.clone(),
            rmdirs,
        }
    }

    /// Drop the restores `rewrite` rejects; those files already hold their content
    pub fn restoring_only(mut self, rewrite: impl Fn(&str) -> bool) -> Self {
        self.restores.retain(|name, _| rewrite(name));
        self
    }

    pub fn deletions(&self) -> &BTreeSet<String> {
        &self.deletions
    }

    pub fn restores(&self) -> &FileTable {
        &self.restores
    }

    /// Directories that may be empty after phase 1, deepest first
    pub fn rmdirs(&self) -> impl Iterator<Item = &String> {
        let mut rmdirs = self.rmdirs.iter().collect::<Vec<_>>();
        rmdirs.sort_by_key(|dir| std::cmp::Reverse(dir.matches('/').count()));
        rmdirs.into_iter()
    }
}

fn parent_dirs(name: &str) -> Vec<String> {
    name.match_indices('/')
        .map(|(position, _)| name[..position].to_string())
        .collect()
}
