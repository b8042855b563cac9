use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::Head;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::collections::HashMap;
use std::io::Write;

impl Repository {
    /// Print history from HEAD back to the root commit, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let Some(head_oid) = self.refs().resolve_head()? else {
            writeln!(self.writer(), "There are no commits yet.")?;
            return Ok(());
        };
        let decorations = self.decorations()?;

        for (position, commit) in self.database().ancestors(Some(head_oid)).enumerate() {
            let commit = commit?;
            if position > 0 {
                writeln!(self.writer())?;
            }
            self.show_commit(&commit, decorations.get(commit.oid()))?;
        }

        Ok(())
    }

    fn show_commit(&self, commit: &Commit, ref_names: Option<&Vec<String>>) -> anyhow::Result<()> {
        let decoration = match ref_names {
            Some(ref_names) => format!(
                " {}{}{}",
                "(".yellow(),
                ref_names.join(&", ".yellow().to_string()),
                ")".yellow()
            ),
            None => String::new(),
        };
        let parent = commit.parent().map(|oid| oid.as_ref()).unwrap_or_default();

        writeln!(
            self.writer(),
            "{}{}",
            format!("commit {}", commit.oid()).yellow(),
            decoration
        )?;
        writeln!(self.writer(), "Parent: {parent}")?;
        writeln!(self.writer(), "Date:   {}", commit.timestamp())?;
        writeln!(self.writer())?;
        writeln!(self.writer(), "    {}", commit.message())?;

        Ok(())
    }

    /// Ref names to show next to each commit, `HEAD -> <branch>` first
    fn decorations(&self) -> anyhow::Result<HashMap<ObjectId, Vec<String>>> {
        let head = self.refs().read_head()?;
        let mut decorations = HashMap::<ObjectId, Vec<String>>::new();

        if let Head::Detached(oid) = &head {
            decorations
                .entry(oid.clone())
                .or_default()
                .push("HEAD".cyan().bold().to_string());
        }

        for branch in self.refs().list_branches()? {
            let Some(oid) = self.refs().read_branch(&branch.name)? else {
                continue;
            };

            let label = if branch.is_current {
                format!("{} {}", "HEAD ->".cyan().bold(), branch.name.as_ref().green().bold())
            } else {
                branch.name.as_ref().green().bold().to_string()
            };

            let names = decorations.entry(oid).or_default();
            if branch.is_current {
                names.insert(0, label);
            } else {
                names.push(label);
            }
        }

        Ok(decorations)
    }
}
