use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create a branch at HEAD, or list branches when no name is given
    pub fn branch(&mut self, branch_name: Option<&str>) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        match branch_name {
            Some(branch_name) => self.create_branch(branch_name),
            None => self.list_branches(),
        }
    }

    fn create_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let oid = self.refs().create_branch(&branch_name)?;

        writeln!(
            self.writer(),
            "Created branch '{}' at {}",
            branch_name,
            oid.to_short_oid()
        )?;

        Ok(())
    }

    fn list_branches(&self) -> anyhow::Result<()> {
        for branch in self.refs().list_branches()? {
            if branch.is_current {
                writeln!(self.writer(), "* {}", branch.name.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch.name)?;
            }
        }

        Ok(())
    }
}
