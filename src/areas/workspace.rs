//! Working tree access
//!
//! Files are addressed by their path relative to the repository root, with
//! `/` separators (`notes/todo.txt`). The `.minigit` directory and the running
//! executable are never listed, so they are never staged or deleted.

use crate::areas::database::Database;
use crate::areas::storage::Storage;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, warn};

pub const REPOSITORY_DIR: &str = ".minigit";

pub struct Workspace {
    path: Box<Path>,
    storage: Rc<dyn Storage>,
    /// Binary to leave alone when it lives inside the working tree
    executable: Option<PathBuf>,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("path", &self.path)
            .field("executable", &self.executable)
            .finish()
    }
}

impl Workspace {
    pub fn new(path: Box<Path>, storage: Rc<dyn Storage>, executable: Option<PathBuf>) -> Self {
        Workspace {
            path,
            storage,
            executable,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_ignored(&self, path: &Path) -> bool {
        path == self.path.join(REPOSITORY_DIR) || self.executable.as_deref() == Some(path)
    }

    /// Every regular file of the working tree, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        self.list_files_under("")
    }

    /// Every regular file at or below `name` (`""` is the root)
    pub fn list_files_under(&self, name: &str) -> anyhow::Result<Vec<String>> {
        let start = self.absolute(name);
        let mut files = Vec::new();

        if !name.is_empty() && self.storage.read(&start)?.is_some() {
            files.push(name.to_string());
            return Ok(files);
        }
        if !self.storage.exists(&start) {
            return Err(RepositoryError::TargetNotFound(name.to_string()).into());
        }

        let mut pending = vec![start];
        while let Some(dir) = pending.pop() {
            for entry in self.storage.list_dir(&dir)? {
                if self.is_ignored(&entry.path) {
                    continue;
                }
                if entry.is_dir() {
                    pending.push(entry.path);
                } else {
                    files.push(self.relative(&entry.path)?);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// Turn a user supplied path into a working tree name
    ///
    /// Relative paths are taken from the repository root. `.` and `..`
    /// components are resolved lexically; escaping the root is an error.
    pub fn normalize_path(&self, path: &Path) -> anyhow::Result<String> {
        let relative = if path.is_absolute() {
            path.strip_prefix(&self.path)
                .map_err(|_| RepositoryError::TargetNotFound(path.display().to_string()))?
        } else {
            path
        };

        let mut parts: Vec<String> = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().to_string()),
                Component::CurDir => {}
                Component::ParentDir => {
                    parts.pop().ok_or_else(|| {
                        RepositoryError::TargetNotFound(path.display().to_string())
                    })?;
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(RepositoryError::TargetNotFound(path.display().to_string()).into());
                }
            }
        }

        Ok(parts.join("/"))
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        self.storage
            .read(&self.absolute(name))?
            .ok_or_else(|| RepositoryError::TargetNotFound(name.to_string()).into())
    }

    /// Whether a regular file sits at `name`
    pub fn file_exists(&self, name: &str) -> anyhow::Result<bool> {
        let path = self.absolute(name);

        Ok(self.storage.exists(&path) && self.storage.read(&path)?.is_some())
    }

    /// Create or overwrite a file, creating missing parent directories
    pub fn write_file(&self, name: &str, data: &[u8]) -> anyhow::Result<()> {
        let path = self.absolute(name);

        if let Some(parent) = path.parent() {
            self.storage.create_dir(parent)?;
        }
        if self.storage.exists(&path) && self.storage.read(&path)?.is_none() {
            // a directory sits where the file goes
            self.remove_tree(&path)?;
        }

        self.storage
            .write(&path, data)
            .with_context(|| format!("failed to write {name}"))
    }

    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        self.storage
            .remove(&self.absolute(name))
            .with_context(|| format!("failed to remove {name}"))
    }

    /// Reconcile the working tree with a checkout plan
    ///
    /// Returns the files whose blob is missing from the store; those are
    /// skipped and everything else is still written.
    pub fn apply_migration(
        &self,
        migration: &Migration,
        database: &Database,
    ) -> anyhow::Result<Vec<(String, ObjectId)>> {
        for name in migration.deletions() {
            debug!(file = %name, "removing file not tracked by target");
            self.remove_file(name)?;
        }
        for dir in migration.rmdirs() {
            self.remove_dir_if_empty(dir)?;
        }

        let mut missing = Vec::new();
        for (name, oid) in migration.restores() {
            match database.get(oid)? {
                Some(content) => {
                    debug!(file = %name, blob = %oid, "restoring file");
                    self.write_file(name, &content)?;
                }
                None => {
                    warn!(file = %name, blob = %oid, "blob missing, file skipped");
                    missing.push((name.clone(), oid.clone()));
                }
            }
        }

        Ok(missing)
    }

    fn remove_dir_if_empty(&self, name: &str) -> anyhow::Result<()> {
        let path = self.absolute(name);

        if self.storage.exists(&path)
            && self.storage.read(&path)?.is_none()
            && self.storage.list_dir(&path)?.is_empty()
        {
            self.storage.remove(&path)?;
        }

        Ok(())
    }

    fn remove_tree(&self, path: &Path) -> anyhow::Result<()> {
        for entry in self.storage.list_dir(path)? {
            if entry.is_dir() {
                self.remove_tree(&entry.path)?;
            } else {
                self.storage.remove(&entry.path)?;
            }
        }

        self.storage.remove(path)
    }

    fn absolute(&self, name: &str) -> PathBuf {
        name.split('/')
            .filter(|part| !part.is_empty())
            .fold(self.path.to_path_buf(), |path, part| path.join(part))
    }

    fn relative(&self, path: &Path) -> anyhow::Result<String> {
        let relative = path
            .strip_prefix(&self.path)
            .with_context(|| format!("{} is outside the working tree", path.display()))?;

        Ok(relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"))
    }
}
