use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::Head;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use std::io::Write;

const DETACHMENT_NOTICE: &str = r#"
You are in 'detached HEAD' state. You can look around, make experimental
changes and commit them, and you can discard any commits you make in this
state without impacting any branches by performing another checkout.

If you want to create a new branch to retain commits you create, you may
do so (now or later) by using the branch command. Example:

    minigit branch <new-branch-name>
"#;

impl Repository {
    /// Switch HEAD to a branch or commit and make the working tree match it
    ///
    /// Working tree files the target does not track are deleted, so uncommitted
    /// work is lost.
    pub fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (new_head, target_oid) = self
            .refs()
            .checkout_target(target, |oid| self.database().is_commit(oid))?;
        let target_commit = self.database().load_commit(&target_oid)?;

        let workspace_files = self.workspace().list_files()?;
        let migration = Migration::plan(&workspace_files, target_commit.files());
        let missing = self
            .workspace()
            .apply_migration(&migration, self.database())?;
        for (name, oid) in missing {
            self.warn(format!("Blob {oid} for {name} not found. Skipping."))?;
        }

        self.refs().set_head(&new_head)?;
        self.clear_staging_area("checkout")?;

        self.print_new_head(&new_head, target, &target_commit)
    }

    fn print_new_head(&self, new_head: &Head, target: &str, commit: &Commit) -> anyhow::Result<()> {
        match new_head {
            Head::Branch(name) => writeln!(self.writer(), "Switched to branch '{name}'")?,
            Head::Detached(oid) => {
                writeln!(self.writer(), "Note: checking out '{target}'.\n{DETACHMENT_NOTICE}")?;
                writeln!(
                    self.writer(),
                    "HEAD is now at {} {}",
                    oid.to_short_oid(),
                    commit.message()
                )?;
            }
        }

        Ok(())
    }
}
