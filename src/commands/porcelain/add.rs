use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::check_file_name;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tracing::debug;

impl Repository {
    /// Stage files; directories (including `.`) expand to every file below them
    ///
    /// Tracked files that are gone from the working tree are staged as
    /// removals. A path that cannot be staged is reported and skipped, the
    /// others are still staged.
    pub fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        // Load the index file from the disk
        self.index().rehydrate()?;
        let tracked = self.tracked_files()?;

        for path in paths {
            let name = match self.workspace().normalize_path(Path::new(path)) {
                Ok(name) => name,
                Err(e) => {
                    writeln!(self.writer(), "error: {path}: {e:#}")?;
                    continue;
                }
            };
            let removed = self.removed_files_under(&name, &tracked)?;

            match self.workspace().list_files_under(&name) {
                Ok(files) => {
                    for file in files {
                        if let Err(e) = self.add_file(&file) {
                            writeln!(self.writer(), "error: {file}: {e:#}")?;
                        }
                    }
                }
                Err(e) if removed.is_empty() => writeln!(self.writer(), "error: {path}: {e:#}")?,
                Err(_) => {}
            }

            for file in removed {
                self.index().remove(file.clone())?;
                debug!(file = %file, "staged removal");
                writeln!(self.writer(), "Removed {file} from staging area.")?;
            }
        }

        self.index().write_updates()?;

        Ok(())
    }

    fn add_file(&self, name: &str) -> anyhow::Result<()> {
        check_file_name(name)?;

        let data = self.workspace().read_file(name)?;
        let blob_id = self.database().put(data)?;

        self.index().add(name.to_string(), blob_id.clone())?;
        debug!(file = %name, blob = %blob_id, "staged");
        writeln!(self.writer(), "Added {name} to staging area.")?;

        Ok(())
    }

    /// Files of the HEAD commit plus files already staged
    fn tracked_files(&self) -> anyhow::Result<BTreeSet<String>> {
        let mut tracked = match self.refs().resolve_head()? {
            Some(head) => self
                .database()
                .load_commit(&head)?
                .files()
                .keys()
                .cloned()
                .collect::<BTreeSet<_>>(),
            None => BTreeSet::new(),
        };
        tracked.extend(self.index().entries().keys().cloned());

        Ok(tracked)
    }

    /// Tracked files at or below `name` that are missing from the working tree
    fn removed_files_under(
        &self,
        name: &str,
        tracked: &BTreeSet<String>,
    ) -> anyhow::Result<Vec<String>> {
        let mut removed = Vec::new();

        for file in tracked.iter().filter(|file| is_under(file, name)) {
            if !self.workspace().file_exists(file)? {
                removed.push(file.clone());
            }
        }

        Ok(removed)
    }
}

fn is_under(file: &str, name: &str) -> bool {
    name.is_empty()
        || file == name
        || file
            .strip_prefix(name)
            .is_some_and(|rest| rest.starts_with('/'))
}
