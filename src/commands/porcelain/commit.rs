use crate::areas::repository::Repository;
use crate::artifacts::core::config::committer_date;
use crate::artifacts::objects::commit::{Commit, FileTable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::io::Write;
use tracing::info;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        // Load the index file from the disk
        self.index().rehydrate()?;
        if self.index().is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let parent = self.refs().resolve_head()?;
        let parent_files = match &parent {
            Some(parent) => self.database().load_commit(parent)?.files().clone(),
            None => FileTable::new(),
        };
        let files = self.index().overlay(&parent_files);

        let commit = self.write_commit(parent, message.trim().to_string(), files)?;
        self.clear_staging_area("commit")?;

        self.print_commit_summary(&commit)
    }

    /// Store a commit and advance HEAD to it
    pub(crate) fn write_commit(
        &self,
        parent: Option<ObjectId>,
        message: String,
        files: FileTable,
    ) -> anyhow::Result<Commit> {
        let algorithm = self.database().algorithm();
        let commit = match committer_date()? {
            Some(timestamp) => Commit::create_at(parent, message, files, timestamp, algorithm)?,
            None => Commit::create(parent, message, files, algorithm)?,
        };

        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;
        info!(oid = %commit_id, "created commit");

        Ok(commit)
    }

    pub(crate) fn print_commit_summary(&self, commit: &Commit) -> anyhow::Result<()> {
        let is_root = match commit.parent() {
            Some(_) => "",
            None => " (root-commit)",
        };

        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            self.refs().read_head()?,
            is_root,
            commit.oid().to_short_oid(),
            commit.message()
        )?;

        Ok(())
    }
}
