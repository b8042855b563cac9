//! Lowest common ancestor search
//!
//! Commits carry at most one parent, so history is a chain and the two walks
//! below are enough:
//!
//! 1. collect every commit reachable from the first tip
//! 2. walk the second tip's ancestors newest first and stop at the first one
//!    already collected
//!
//! This is not a general merge-base algorithm. With multi-parent histories it
//! would miss candidates and could pick a commit that is not the best base.
//!
//! ```rust,ignore
//! let finder = LCAFinder::new(|oid| Ok(database.load_commit(oid)?.parent().cloned()));
//! let base = finder.find_lca(&head_oid, &target_oid)?;
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;
use tracing::debug;

pub struct LCAFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    parent_loader: ParentLoaderFn,
}

impl<ParentLoaderFn> LCAFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    pub fn new(parent_loader: ParentLoaderFn) -> Self {
        Self { parent_loader }
    }

    pub fn find_lca(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let source_ancestors = self.ancestor_set(source_commit_id)?;

        let mut current = Some(target_commit_id.clone());
        let mut seen = HashSet::new();
        while let Some(commit_id) = current {
            if source_ancestors.contains(&commit_id) {
                debug!(source = %source_commit_id, target = %target_commit_id, lca = %commit_id, "found common ancestor");
                return Ok(Some(commit_id));
            }
            if !seen.insert(commit_id.clone()) {
                anyhow::bail!("commit history loops back to {}", commit_id);
            }

            current = (self.parent_loader)(&commit_id)?;
        }

        debug!(source = %source_commit_id, target = %target_commit_id, "histories share no commit");
        Ok(None)
    }

    fn ancestor_set(&self, start: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut ancestors = HashSet::new();
        let mut current = Some(start.clone());

        while let Some(commit_id) = current {
            current = (self.parent_loader)(&commit_id)?;
            if !ancestors.insert(commit_id.clone()) {
                anyhow::bail!("commit history loops back to {}", commit_id);
            }
        }

        Ok(ancestors)
    }
}
