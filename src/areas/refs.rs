//! References (HEAD and branches)
//!
//! ## File Format
//!
//! - `HEAD` holds either `ref: refs/heads/<name>` (on a branch) or a bare
//!   commit hash (detached)
//! - `refs/heads/<name>` holds the branch tip hash, or nothing at all for a
//!   branch without commits yet
//!
//! Every file ends with a newline. Nothing is cached between calls: the ref
//! files are the single source of truth for where HEAD and branches point.

use crate::areas::storage::Storage;
use crate::artifacts::branch::branch_name::{BranchName, Head};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

pub const HEAD_REF_NAME: &str = "HEAD";

/// Raw content of a ref file
#[derive(Debug, Clone, PartialEq, Eq)]
enum SymRefOrOid {
    SymRef(String),
    Oid(ObjectId),
    Empty,
}

impl SymRefOrOid {
    fn parse(content: &str) -> anyhow::Result<SymRefOrOid> {
        let content = content.trim();

        if content.is_empty() {
            return Ok(SymRefOrOid::Empty);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        match symref_match {
            Some(symref_match) => Ok(SymRefOrOid::SymRef(symref_match[1].to_string())),
            None => Ok(SymRefOrOid::Oid(ObjectId::try_parse(content.to_string())?)),
        }
    }
}

/// A branch as shown by `branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchListing {
    pub name: BranchName,
    pub is_current: bool,
}

pub struct Refs {
    /// Path to the repository directory (`.minigit`)
    path: Box<Path>,
    storage: Rc<dyn Storage>,
}

impl std::fmt::Debug for Refs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refs").field("path", &self.path).finish()
    }
}

impl Refs {
    pub fn new(path: Box<Path>, storage: Rc<dyn Storage>) -> Self {
        Refs { path, storage }
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    fn branch_path(&self, name: &BranchName) -> PathBuf {
        name.as_ref()
            .split('/')
            .fold(self.heads_path(), |path, part| path.join(part))
    }

    fn read_ref_file(&self, path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        match self.storage.read(path)? {
            Some(content) => {
                let content = std::str::from_utf8(&content)
                    .with_context(|| format!("ref file {} is not UTF-8", path.display()))?;
                Ok(Some(SymRefOrOid::parse(content)?))
            }
            None => Ok(None),
        }
    }

    fn write_ref_file(&self, path: &Path, content: &str) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            self.storage.create_dir(parent)?;
        }

        self.storage
            .write(path, format!("{content}\n").as_bytes())
            .with_context(|| format!("failed to write ref file {}", path.display()))
    }

    /// Where HEAD points, without resolving a branch to its commit
    pub fn read_head(&self) -> anyhow::Result<Head> {
        match self.read_ref_file(&self.head_path())? {
            Some(SymRefOrOid::SymRef(ref_path)) => {
                Ok(Head::Branch(BranchName::try_parse_ref_path(&ref_path)?))
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(Head::Detached(oid)),
            Some(SymRefOrOid::Empty) | None => Err(RepositoryError::RepoNotInitialized.into()),
        }
    }

    /// Commit HEAD stands on; `None` on a branch with no commits yet
    pub fn resolve_head(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Branch(name) => self.read_branch(&name),
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// Advance HEAD: the current branch when on one, HEAD itself when detached
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        match self.read_head()? {
            Head::Branch(name) => {
                debug!(branch = %name, oid = %oid, "advancing branch");
                self.write_ref_file(&self.branch_path(&name), oid.as_ref())
            }
            Head::Detached(_) => {
                debug!(oid = %oid, "advancing detached HEAD");
                self.write_ref_file(&self.head_path(), oid.as_ref())
            }
        }
    }

    /// Point HEAD somewhere else, without touching any branch
    pub fn set_head(&self, head: &Head) -> anyhow::Result<()> {
        debug!(?head, "switching HEAD");

        match head {
            Head::Branch(name) => {
                self.write_ref_file(&self.head_path(), &format!("ref: {}", name.to_ref_path()))
            }
            Head::Detached(oid) => self.write_ref_file(&self.head_path(), oid.as_ref()),
        }
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.storage.exists(&self.branch_path(name))
    }

    /// Tip of a branch; `None` if it has no commits yet
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        match self.read_ref_file(&self.branch_path(name))? {
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            Some(SymRefOrOid::Empty) => Ok(None),
            Some(SymRefOrOid::SymRef(target)) => {
                anyhow::bail!("branch {} is a symbolic ref to {}", name, target)
            }
            None => Err(RepositoryError::TargetNotFound(name.to_string()).into()),
        }
    }

    /// Write a branch file for a branch that has no commits yet
    pub fn create_empty_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        self.write_ref_file(&self.branch_path(name), "")
    }

    /// New branch at the commit HEAD currently resolves to
    pub fn create_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if self.branch_exists(name) {
            return Err(RepositoryError::BranchExists(name.to_string()).into());
        }

        let head_oid = self
            .resolve_head()?
            .ok_or(RepositoryError::NoCommitsYet)?;
        self.write_ref_file(&self.branch_path(name), head_oid.as_ref())?;
        debug!(branch = %name, oid = %head_oid, "created branch");

        Ok(head_oid)
    }

    /// Every branch, sorted by name, marking the one HEAD is on
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchListing>> {
        let current = self.read_head()?;
        let mut branches = Vec::new();

        let mut pending = vec![self.heads_path()];
        while let Some(dir) = pending.pop() {
            for entry in self.storage.list_dir(&dir)? {
                if entry.is_dir() {
                    pending.push(entry.path);
                    continue;
                }

                let relative = entry
                    .path
                    .strip_prefix(self.heads_path())
                    .with_context(|| format!("{} is outside refs/heads", entry.path.display()))?;
                let name = relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                let name = BranchName::try_parse(name)?;

                branches.push(BranchListing {
                    is_current: current.branch() == Some(&name),
                    name,
                });
            }
        }

        branches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(branches)
    }

    /// Resolve what `checkout <name>` switches to
    ///
    /// A branch name wins over a commit hash. `is_commit` tells whether a
    /// hash names a stored commit.
    pub fn checkout_target(
        &self,
        name: &str,
        is_commit: impl Fn(&ObjectId) -> bool,
    ) -> anyhow::Result<(Head, ObjectId)> {
        if let Ok(branch) = BranchName::try_parse(name.to_string())
            && self.branch_exists(&branch)
        {
            let oid = self
                .read_branch(&branch)?
                .ok_or_else(|| RepositoryError::BranchHasNoCommits(branch.to_string()))?;
            return Ok((Head::Branch(branch), oid));
        }

        match ObjectId::try_parse(name.to_string()) {
            Ok(oid) if is_commit(&oid) => Ok((Head::Detached(oid.clone()), oid)),
            _ => Err(RepositoryError::TargetNotFound(name.to_string()).into()),
        }
    }
}
