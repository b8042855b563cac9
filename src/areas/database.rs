//! Object database
//!
//! Content-addressed store for blobs and commits. Objects are written once
//! under `objects/<xx>/<rest-of-hash>` and never modified or deleted; writing
//! an object that already exists is a no-op.

use crate::areas::storage::Storage;
use crate::artifacts::log::ancestors::Ancestors;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::hash_algorithm::HashAlgorithm;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

pub struct Database {
    path: Box<Path>,
    storage: Rc<dyn Storage>,
    algorithm: HashAlgorithm,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl Database {
    pub fn new(path: Box<Path>, storage: Rc<dyn Storage>, algorithm: HashAlgorithm) -> Self {
        Database {
            path,
            storage,
            algorithm,
        }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    /// Store raw file content as a blob and return its address
    pub fn put(&self, data: Bytes) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(data))
    }

    /// Content of the blob at `object_id`, `None` if no such object exists
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<Option<Bytes>> {
        if !self.exists(object_id) {
            return Ok(None);
        }

        self.parse_object_as_blob(object_id)
            .map(|blob| blob.map(Blob::into_content))
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id(self.algorithm)?;
        let object_path = self.object_path(&object_id);

        // identical content maps to the identical path, so an existing file
        // already holds these bytes
        if self.storage.exists(&object_path) {
            debug!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        self.storage.create_dir(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;
        self.storage
            .write(&object_path, &object.encode()?)
            .context(format!("Unable to write object file {}", object_path.display()))?;

        debug!(oid = %object_id, kind = %object.object_type(), "stored object");
        Ok(object_id)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.storage.exists(&self.object_path(object_id))
    }

    pub fn is_commit(&self, object_id: &ObjectId) -> bool {
        self.exists(object_id)
            && matches!(
                self.parse_object_as_bytes(object_id),
                Ok((ObjectType::Commit, _))
            )
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Some(Blob::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Load a commit, failing if it is missing or is not a commit
    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        self.parse_object_as_commit(object_id)?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a commit", object_id))
    }

    /// Lazily walk `start` and its parents, newest first
    pub fn ancestors(&self, start: Option<ObjectId>) -> Ancestors<'_> {
        Ancestors::new(self, start)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, Cursor<Bytes>)> {
        let object_content = self.read_object(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::parse_header(&mut object_reader)?;
        let payload_len = object_reader.get_ref().len() - object_reader.position() as usize;
        if payload_len != size {
            anyhow::bail!(
                "Corrupt object {}: header says {} bytes, found {}",
                object_id,
                size,
                payload_len
            );
        }

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_id);

        self.storage
            .read(&object_path)
            .context(format!("Unable to read object file {}", object_path.display()))?
            .ok_or_else(|| anyhow::anyhow!("object {} not found", object_id))
    }
}
