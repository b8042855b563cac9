use crate::areas::repository::Repository;
use crate::artifacts::diff::line_diff::LineDiff;
use crate::errors::RepositoryError;
use bytes::Bytes;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Compare two files line by line, by line number
    ///
    /// Needs no repository: any two readable files can be compared.
    pub fn diff(&self, left: &str, right: &str) -> anyhow::Result<()> {
        let left_content = self.read_diff_side(left)?;
        let right_content = self.read_diff_side(right)?;
        let left_text = String::from_utf8_lossy(&left_content);
        let right_text = String::from_utf8_lossy(&right_content);

        let changes = LineDiff::new(&left_text, &right_text).changes();
        if changes.is_empty() {
            writeln!(self.writer(), "Files are identical.")?;
            return Ok(());
        }

        for change in changes {
            writeln!(self.writer(), "Line {}:", change.line)?;
            if let Some(line) = change.left {
                writeln!(self.writer(), "{}", format!("- {line}").red())?;
            }
            if let Some(line) = change.right {
                writeln!(self.writer(), "{}", format!("+ {line}").green())?;
            }
        }

        Ok(())
    }

    fn read_diff_side(&self, name: &str) -> anyhow::Result<Bytes> {
        let path = Path::new(name);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path().join(path)
        };

        self.storage()
            .read(&path)?
            .ok_or_else(|| RepositoryError::TargetNotFound(name.to_string()).into())
    }
}
