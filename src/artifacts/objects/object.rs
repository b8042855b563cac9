use crate::artifacts::objects::hash_algorithm::HashAlgorithm;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::{BufRead, Write};

/// Payload encoding, without the `<kind> <size>\0` header
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Full stored encoding: header followed by the payload
    fn encode(&self) -> Result<Bytes> {
        let payload = self.serialize()?;

        let mut object_bytes = Vec::with_capacity(payload.len() + 16);
        let header = format!("{} {}\0", self.object_type().as_str(), payload.len());
        object_bytes.write_all(header.as_bytes())?;
        object_bytes.write_all(&payload)?;

        Ok(Bytes::from(object_bytes))
    }

    /// Address of the object; by default the digest of its full encoding
    fn object_id(&self, algorithm: HashAlgorithm) -> Result<ObjectId> {
        algorithm.digest(&self.encode()?)
    }
}
