//! File system capabilities
//!
//! Every area reaches the disk through the [`Storage`] trait instead of calling
//! `std::fs` directly. `FileStorage` is the real thing; `MemoryStorage` keeps
//! a whole repository in memory and is what the unit tests run against.
//!
//! ## Locking
//!
//! `FileStorage` holds a `file-guard` byte-range lock for the duration of a
//! single `read` or `write` call, so a reader never sees half of a write.
//! Nothing serializes a *sequence* of calls though: two processes doing
//! read-modify-write on HEAD or the index can still interleave and lose an
//! update. Running two commands against the same repository at once is not
//! supported.

use crate::errors::RepositoryError;
use bytes::Bytes;
use derive_new::new;
use file_guard::Lock;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StorageEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl StorageEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

pub trait Storage {
    /// Read a whole file; `Ok(None)` when nothing exists at `path`.
    fn read(&self, path: &Path) -> anyhow::Result<Option<Bytes>>;

    /// Create or truncate the file at `path`. The parent directory must exist.
    fn write(&self, path: &Path, data: &[u8]) -> anyhow::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    /// Create a directory along with any missing ancestors.
    fn create_dir(&self, path: &Path) -> anyhow::Result<()>;

    /// Remove a file or an empty directory.
    fn remove(&self, path: &Path) -> anyhow::Result<()>;

    /// List the direct children of a directory, sorted by file name.
    fn list_dir(&self, path: &Path) -> anyhow::Result<Vec<StorageEntry>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FileStorage;

impl Storage for FileStorage {
    fn read(&self, path: &Path) -> anyhow::Result<Option<Bytes>> {
        let mut file = match std::fs::OpenOptions::new().read(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepositoryError::io(path, e).into()),
        };

        if file.metadata().map(|m| m.is_dir()).unwrap_or(false) {
            return Ok(None);
        }

        let mut lock = file_guard::lock(&mut file, Lock::Shared, 0, 1)
            .map_err(|e| RepositoryError::io(path, e))?;

        let mut content = Vec::new();
        lock.deref_mut()
            .read_to_end(&mut content)
            .map_err(|e| RepositoryError::io(path, e))?;

        Ok(Some(content.into()))
    }

    fn write(&self, path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| RepositoryError::io(path, e))?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)
            .map_err(|e| RepositoryError::io(path, e))?;

        lock.deref_mut()
            .write_all(data)
            .map_err(|e| RepositoryError::io(path, e))?;

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(path).map_err(|e| RepositoryError::io(path, e))?;
        Ok(())
    }

    fn remove(&self, path: &Path) -> anyhow::Result<()> {
        let metadata = std::fs::symlink_metadata(path).map_err(|e| RepositoryError::io(path, e))?;

        if metadata.is_dir() {
            std::fs::remove_dir(path).map_err(|e| RepositoryError::io(path, e))?;
        } else {
            std::fs::remove_file(path).map_err(|e| RepositoryError::io(path, e))?;
        }

        Ok(())
    }

    fn list_dir(&self, path: &Path) -> anyhow::Result<Vec<StorageEntry>> {
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                let entry = entry.map_err(|e| {
                    let entry_path = e.path().unwrap_or(path).to_path_buf();
                    match e.into_io_error() {
                        Some(source) => RepositoryError::io(entry_path, source).into(),
                        None => anyhow::anyhow!("file system loop at {:?}", entry_path),
                    }
                })?;
                let kind = if entry.file_type().is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                };

                Ok(StorageEntry::new(entry.into_path(), kind))
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
enum Node {
    File(Bytes),
    Directory,
}

/// In-memory storage
///
/// Paths are taken verbatim (no canonicalization), so callers should stick to
/// absolute paths built from one root.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(path: &Path) -> RepositoryError {
        RepositoryError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
        )
    }

    fn is_dir(&self, path: &Path) -> bool {
        // the root of the tree always exists
        path.parent().is_none()
            || matches!(self.nodes.borrow().get(path), Some(Node::Directory))
    }
}

impl Storage for MemoryStorage {
    fn read(&self, path: &Path) -> anyhow::Result<Option<Bytes>> {
        match self.nodes.borrow().get(path) {
            Some(Node::File(data)) => Ok(Some(data.clone())),
            _ => Ok(None),
        }
    }

    fn write(&self, path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let parent = path.parent().ok_or_else(|| Self::not_found(path))?;
        if !self.is_dir(parent) {
            return Err(Self::not_found(parent).into());
        }
        if self.is_dir(path) {
            return Err(RepositoryError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::IsADirectory, "is a directory"),
            )
            .into());
        }

        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(Bytes::copy_from_slice(data)));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.parent().is_none() || self.nodes.borrow().contains_key(path)
    }

    fn create_dir(&self, path: &Path) -> anyhow::Result<()> {
        let mut nodes = self.nodes.borrow_mut();

        for ancestor in path.ancestors().filter(|p| p.parent().is_some()) {
            match nodes.get(ancestor) {
                Some(Node::Directory) => {}
                Some(Node::File(_)) => {
                    return Err(RepositoryError::io(
                        ancestor,
                        std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file exists"),
                    )
                    .into());
                }
                None => {
                    nodes.insert(ancestor.to_path_buf(), Node::Directory);
                }
            }
        }

        Ok(())
    }

    fn remove(&self, path: &Path) -> anyhow::Result<()> {
        let mut nodes = self.nodes.borrow_mut();

        if !nodes.contains_key(path) {
            return Err(Self::not_found(path).into());
        }

        let has_children = nodes.keys().any(|other| other.parent() == Some(path));
        if has_children {
            return Err(RepositoryError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::DirectoryNotEmpty, "directory not empty"),
            )
            .into());
        }

        nodes.remove(path);
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> anyhow::Result<Vec<StorageEntry>> {
        if !self.is_dir(path) {
            return Err(Self::not_found(path).into());
        }

        // BTreeMap iteration keeps children sorted by path
        Ok(self
            .nodes
            .borrow()
            .iter()
            .filter(|(child, _)| child.parent() == Some(path))
            .map(|(child, node)| {
                let kind = match node {
                    Node::File(_) => EntryKind::File,
                    Node::Directory => EntryKind::Directory,
                };
                StorageEntry::new(child.clone(), kind)
            })
            .collect())
    }
}
