//! Staging area
//!
//! The index holds what the next commit changes relative to its parent: file
//! name to blob id entries laid over the parent's file table, plus the names
//! the commit drops. It is loaded from disk at the start of every command
//! (`rehydrate`) and written back only when something changed.
//!
//! ## File Format
//!
//! One entry per line, sorted by file name:
//!
//! ```text
//! <path> <blob hash>
//! <path> -
//! ```
//!
//! A `-` in place of the hash stages the removal of `<path>`. Paths
//! containing a space cannot be represented and are rejected.

use crate::areas::storage::Storage;
use crate::artifacts::objects::commit::{FileTable, check_file_name};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::rc::Rc;

const REMOVAL_MARKER: &str = "-";

pub struct Index {
    /// Path to the index file (`.minigit/index`)
    path: Box<Path>,
    storage: Rc<dyn Storage>,
    entries: FileTable,
    removals: BTreeSet<String>,
    /// Set when the in-memory entries differ from what was loaded
    changed: bool,
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("path", &self.path)
            .field("entries", &self.entries)
            .field("removals", &self.removals)
            .field("changed", &self.changed)
            .finish()
    }
}

impl Index {
    pub fn new(path: Box<Path>, storage: Rc<dyn Storage>) -> Self {
        Index {
            path,
            storage,
            entries: FileTable::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload the entries from disk, dropping any unsaved change
    ///
    /// A missing index file reads as an empty staging area.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.removals.clear();
        self.changed = false;

        let Some(content) = self.storage.read(&self.path)? else {
            return Ok(());
        };
        let content = std::str::from_utf8(&content)
            .with_context(|| format!("index file {} is not UTF-8", self.path.display()))?;

        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            let (name, oid) = line
                .rsplit_once(' ')
                .ok_or_else(|| anyhow::anyhow!("malformed index line: {:?}", line))?;
            check_file_name(name)?;

            if oid == REMOVAL_MARKER {
                self.removals.insert(name.to_string());
            } else {
                self.entries
                    .insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
            }
        }

        Ok(())
    }

    /// Stage `name` at `oid`, replacing any earlier entry for the same name
    pub fn add(&mut self, name: String, oid: ObjectId) -> anyhow::Result<()> {
        check_file_name(&name)?;

        if self.removals.remove(&name) {
            self.changed = true;
        }
        if self.entries.get(&name) != Some(&oid) {
            self.entries.insert(name, oid);
            self.changed = true;
        }

        Ok(())
    }

    /// Stage the removal of `name`, dropping any staged content for it
    pub fn remove(&mut self, name: String) -> anyhow::Result<()> {
        check_file_name(&name)?;

        if self.entries.remove(&name).is_some() {
            self.changed = true;
        }
        if self.removals.insert(name) {
            self.changed = true;
        }

        Ok(())
    }

    /// Replace every entry at once; `removals` are staged as dropped
    pub fn replace(
        &mut self,
        entries: FileTable,
        removals: BTreeSet<String>,
    ) -> anyhow::Result<()> {
        entries
            .keys()
            .chain(removals.iter())
            .try_for_each(|name| check_file_name(name))?;

        if self.entries != entries || self.removals != removals {
            self.entries = entries;
            self.removals = removals;
            self.changed = true;
        }

        Ok(())
    }

    /// Empty the staging area; the next `write_updates` always rewrites the file
    pub fn clear(&mut self) {
        self.entries.clear();
        self.removals.clear();
        self.changed = true;
    }

    pub fn entries(&self) -> &FileTable {
        &self.entries
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.removals.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// The file table of a commit made on top of `parent` from this index
    pub fn overlay(&self, parent: &FileTable) -> FileTable {
        let mut files = parent.clone();
        files.retain(|name, _| !self.removals.contains(name));
        files.extend(self.entries.clone());
        files
    }

    /// Persist the entries if they changed since the last load or write
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let lines = self
            .entries
            .iter()
            .map(|(name, oid)| (name, oid.to_string()))
            .chain(
                self.removals
                    .iter()
                    .map(|name| (name, REMOVAL_MARKER.to_string())),
            )
            .collect::<BTreeMap<_, _>>();
        let content = lines
            .iter()
            .map(|(name, oid)| format!("{name} {oid}\n"))
            .collect::<String>();

        self.storage
            .write(&self.path, content.as_bytes())
            .with_context(|| format!("failed to write index file {}", self.path.display()))?;
        self.changed = false;

        Ok(())
    }
}
