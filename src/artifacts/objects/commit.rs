//! Commit object
//!
//! A commit is an immutable snapshot record: a message, the time it was made,
//! at most one parent and a file table mapping file names to blob ids.
//!
//! ## Format
//!
//! On disk (after the `commit <size>\0` header):
//! ```text
//! commitHash:<hash>
//! message:<message>
//! timestamp:<YYYY/M/D\tH:M:S>
//! parent:<parent hash or empty>
//! files:<name1>=<hash1>,<name2>=<hash2>,...
//! ```
//!
//! ## Hashing
//!
//! The commit hash covers every line but the first. The file table is a
//! `BTreeMap`, so the pairs are always emitted sorted by file name and the
//! hash does not depend on the order entries were inserted in.

use crate::artifacts::objects::hash_algorithm::HashAlgorithm;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Read};

/// File name to blob id, ordered by file name
pub type FileTable = BTreeMap<String, ObjectId>;

/// Non zero-padded date and time, separated by a tab
pub const TIMESTAMP_FORMAT: &str = "%Y/%-m/%-d\t%-H:%-M:%-S";

const HASH_KEY: &str = "commitHash";
const MESSAGE_KEY: &str = "message";
const TIMESTAMP_KEY: &str = "timestamp";
const PARENT_KEY: &str = "parent";
const FILES_KEY: &str = "files";

/// Reject file names that the index or commit text formats cannot carry.
pub fn check_file_name(name: &str) -> anyhow::Result<()> {
    if name.is_empty() || name.contains([' ', ',', '=', '\n', '\r']) {
        return Err(RepositoryError::UnsupportedPath(name.to_string()).into());
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    oid: ObjectId,
    message: String,
    timestamp: String,
    parent: Option<ObjectId>,
    files: FileTable,
}

impl Commit {
    /// Build a new commit stamped with the current local time
    ///
    /// The commit is not persisted; store it through the database.
    pub fn create(
        parent: Option<ObjectId>,
        message: String,
        files: FileTable,
        algorithm: HashAlgorithm,
    ) -> anyhow::Result<Self> {
        Self::create_at(
            parent,
            message,
            files,
            chrono::Local::now().naive_local(),
            algorithm,
        )
    }

    /// Build a new commit with an explicit timestamp
    pub fn create_at(
        parent: Option<ObjectId>,
        message: String,
        files: FileTable,
        timestamp: chrono::NaiveDateTime,
        algorithm: HashAlgorithm,
    ) -> anyhow::Result<Self> {
        if message.contains(['\n', '\r']) {
            anyhow::bail!("commit message must be a single line");
        }
        files.keys().try_for_each(|name| check_file_name(name))?;

        let timestamp = timestamp.format(TIMESTAMP_FORMAT).to_string();
        let body = Self::canonical_body(&message, &timestamp, parent.as_ref(), &files);
        let oid = algorithm.digest(body.as_bytes())?;

        Ok(Commit {
            oid,
            message,
            timestamp,
            parent,
            files,
        })
    }

    fn canonical_body(
        message: &str,
        timestamp: &str,
        parent: Option<&ObjectId>,
        files: &FileTable,
    ) -> String {
        let parent = parent.map(|oid| oid.as_ref()).unwrap_or_default();
        let files = files
            .iter()
            .map(|(name, oid)| format!("{name}={oid}"))
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{MESSAGE_KEY}:{message}\n{TIMESTAMP_KEY}:{timestamp}\n{PARENT_KEY}:{parent}\n{FILES_KEY}:{files}\n"
        )
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn files(&self) -> &FileTable {
        &self.files
    }
}

/// Split `key:value`, checking the key
fn parse_field<'l>(line: Option<&'l str>, key: &str) -> anyhow::Result<&'l str> {
    let line = line.with_context(|| format!("Invalid commit object: missing {key} line"))?;

    line.split_once(':')
        .filter(|(found, _)| *found == key)
        .map(|(_, value)| value)
        .with_context(|| format!("Invalid commit object: invalid {key} line"))
}

fn parse_files(value: &str) -> anyhow::Result<FileTable> {
    if value.is_empty() {
        return Ok(FileTable::new());
    }

    value
        .split(',')
        .map(|pair| {
            let (name, oid) = pair
                .split_once('=')
                .with_context(|| format!("Invalid commit object: bad file entry '{pair}'"))?;
            Ok((name.to_string(), ObjectId::try_parse(oid.to_string())?))
        })
        .collect()
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let body = Self::canonical_body(
            &self.message,
            &self.timestamp,
            self.parent.as_ref(),
            &self.files,
        );

        Ok(Bytes::from(format!("{HASH_KEY}:{}\n{body}", self.oid)))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Invalid commit object: not valid UTF-8")?;
        let mut lines = content.lines();

        let oid = ObjectId::try_parse(parse_field(lines.next(), HASH_KEY)?.to_string())?;
        let message = parse_field(lines.next(), MESSAGE_KEY)?.to_string();
        let timestamp = parse_field(lines.next(), TIMESTAMP_KEY)?.to_string();
        let parent = match parse_field(lines.next(), PARENT_KEY)? {
            "" => None,
            parent => Some(ObjectId::try_parse(parent.to_string())?),
        };
        let files = parse_files(parse_field(lines.next(), FILES_KEY)?)?;

        Ok(Commit {
            oid,
            message,
            timestamp,
            parent,
            files,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    // the address is fixed at creation and covers the body only
    fn object_id(&self, _algorithm: HashAlgorithm) -> anyhow::Result<ObjectId> {
        Ok(self.oid.clone())
    }
}
