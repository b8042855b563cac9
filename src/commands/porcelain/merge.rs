use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::lca_finder::LCAFinder;
use crate::artifacts::merge::resolution::{MergeDecision, ThreeWayMerge, conflict_markers};
use crate::artifacts::objects::commit::{Commit, FileTable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

impl Repository {
    /// Three-way merge of a branch into HEAD
    ///
    /// Without conflicts the result is committed with HEAD as its only parent.
    /// With conflicts the marked-up files are written and staged, and nothing
    /// is committed.
    pub fn merge(&mut self, branch: &str) -> anyhow::Result<MergeOutcome> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch.to_string())?;
        if !self.refs().branch_exists(&branch_name) {
            return Err(RepositoryError::TargetNotFound(branch.to_string()).into());
        }
        let target_oid = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or_else(|| RepositoryError::BranchHasNoCommits(branch.to_string()))?;
        let head_oid = self
            .refs()
            .resolve_head()?
            .ok_or(RepositoryError::NoCommitsYet)?;

        if head_oid == target_oid {
            writeln!(self.writer(), "Already up to date.")?;
            return Ok(MergeOutcome::UpToDate);
        }

        let lca_finder = LCAFinder::new(|oid: &ObjectId| {
            Ok(self.database().load_commit(oid)?.parent().cloned())
        });
        let base_oid = lca_finder
            .find_lca(&head_oid, &target_oid)?
            .ok_or_else(|| RepositoryError::NoCommonAncestor(branch.to_string()))?;

        let base = self.database().load_commit(&base_oid)?;
        let current = self.database().load_commit(&head_oid)?;
        let target = self.database().load_commit(&target_oid)?;

        let decisions = ThreeWayMerge::new(base.files(), current.files(), target.files()).decisions();
        let (merged, conflicts) = self.resolve_decisions(&decisions, &current, &branch_name)?;

        self.update_working_tree(&decisions, &current, &merged)?;

        if !conflicts.is_empty() {
            {
                let removals = current
                    .files()
                    .keys()
                    .filter(|name| !merged.contains_key(*name))
                    .cloned()
                    .collect::<BTreeSet<_>>();
                let mut index = self.index();
                index.replace(merged, removals)?;
                index.write_updates()?;
            }
            writeln!(
                self.writer(),
                "Automatic merge failed; fix conflicts and then commit the result."
            )?;
            return Ok(MergeOutcome::Conflicted(conflicts));
        }

        let files = self.rehash_merged_files(&merged)?;
        {
            let mut index = self.index();
            index.replace(files.clone(), BTreeSet::new())?;
            index.write_updates()?;
        }

        let message = format!("Merge branch '{branch_name}' into {head_oid}");
        let commit = self.write_commit(Some(head_oid), message, files)?;
        self.clear_staging_area("merge")?;

        writeln!(self.writer(), "Merge made by the 'three-way' strategy.")?;
        self.print_commit_summary(&commit)?;

        Ok(MergeOutcome::Merged(commit.oid().clone()))
    }

    /// Merged file table plus the names that ended in conflict
    ///
    /// Conflicted files resolve to a new blob holding both sides between
    /// conflict markers.
    fn resolve_decisions(
        &self,
        decisions: &BTreeMap<String, MergeDecision>,
        current: &Commit,
        branch_name: &BranchName,
    ) -> anyhow::Result<(FileTable, Vec<String>)> {
        let mut merged = FileTable::new();
        let mut conflicts = Vec::new();

        for (name, decision) in decisions {
            match decision {
                MergeDecision::Conflict {
                    current: ours,
                    target: theirs,
                } => {
                    let ours = self.load_merge_blob(name, ours)?;
                    let theirs = self.load_merge_blob(name, theirs)?;
                    let content = conflict_markers(&ours, &theirs, branch_name.as_ref());

                    merged.insert(name.clone(), self.database().put(content)?);
                    conflicts.push(name.clone());
                    writeln!(self.writer(), "CONFLICT (content): Merge conflict in {name}")?;
                }
                MergeDecision::TakeTarget(_) => {
                    let action = if current.files().contains_key(name) {
                        "Updating"
                    } else {
                        "Adding"
                    };
                    writeln!(self.writer(), "{action} {name}")?;
                }
                MergeDecision::Delete => {
                    if current.files().contains_key(name) {
                        writeln!(self.writer(), "Removing {name}")?;
                    }
                }
                MergeDecision::Unchanged(_) | MergeDecision::KeepCurrent(_) => {}
            }

            if let Some(oid) = decision.resolved_oid() {
                merged.insert(name.clone(), oid.clone());
            }
        }

        Ok((merged, conflicts))
    }

    fn load_merge_blob(&self, name: &str, oid: &ObjectId) -> anyhow::Result<Bytes> {
        self.database()
            .get(oid)?
            .ok_or_else(|| {
                RepositoryError::BlobMissing {
                    path: name.to_string(),
                    oid: oid.clone(),
                }
                .into()
            })
    }

    /// Write what the merge changed; files kept from HEAD are left as they are
    fn update_working_tree(
        &self,
        decisions: &BTreeMap<String, MergeDecision>,
        current: &Commit,
        merged: &FileTable,
    ) -> anyhow::Result<()> {
        let workspace_files = self.workspace().list_files()?;
        let tracked = workspace_files
            .iter()
            .filter(|name| current.files().contains_key(*name));
        let migration = Migration::plan(tracked, merged).restoring_only(|name| {
            decisions.get(name).is_some_and(|decision| {
                decision.is_conflict() || matches!(decision, MergeDecision::TakeTarget(_))
            })
        });

        let missing = self
            .workspace()
            .apply_migration(&migration, self.database())?;
        for (name, oid) in missing {
            self.warn(format!("Blob {oid} for {name} not found. Skipping."))?;
        }

        Ok(())
    }

    /// Hash what is on disk now for every merged file
    fn rehash_merged_files(&self, merged: &FileTable) -> anyhow::Result<FileTable> {
        let mut files = FileTable::new();

        for name in merged.keys() {
            match self.workspace().read_file(name) {
                Ok(content) => {
                    files.insert(name.clone(), self.database().put(content)?);
                }
                Err(e) if matches!(
                    e.downcast_ref::<RepositoryError>(),
                    Some(RepositoryError::TargetNotFound(_))
                ) =>
                {
                    self.warn(format!("{name} is missing from the working tree. Skipping."))?;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(files)
    }
}
