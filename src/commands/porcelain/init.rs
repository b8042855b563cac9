use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::{BranchName, Head};
use anyhow::Context;
use std::io::Write;
use tracing::info;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            writeln!(self.writer(), "Minigit repository already exists.")?;
            return Ok(());
        }

        self.storage()
            .create_dir(self.database().objects_path())
            .context("Failed to create .minigit/objects directory")?;
        self.storage()
            .create_dir(&self.refs().heads_path())
            .context("Failed to create .minigit/refs/heads directory")?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .create_empty_branch(&default_branch)
            .context("Failed to create the default branch")?;
        self.storage()
            .write(self.index().path(), b"")
            .context("Failed to create .minigit/index file")?;
        self.config()
            .save(self.storage(), &self.config_path())
            .context("Failed to write .minigit/config file")?;

        // HEAD last: its presence is what marks the repository as initialized
        self.refs()
            .set_head(&Head::Branch(default_branch))
            .context("Failed to create initial HEAD reference")?;

        info!(hash = %self.config().hash_algorithm(), "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty Minigit repository in {}",
            self.repository_path().display()
        )?;

        Ok(())
    }
}
