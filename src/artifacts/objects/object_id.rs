//! Object identifier
//!
//! Object ids are lowercase hexadecimal digests. Their width depends on the
//! configured [`HashAlgorithm`]: 40 characters for SHA-1, 16 for djb2.
//!
//! ## Storage
//!
//! Objects are stored in `.minigit/objects/<first-2-chars>/<remaining-chars>`

use crate::artifacts::objects::SHORT_OBJECT_ID_LENGTH;
use crate::artifacts::objects::hash_algorithm::HashAlgorithm;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID
    ///
    /// Accepts any hex string whose width matches one of the supported hash
    /// algorithms.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if !HashAlgorithm::ALL
            .iter()
            .any(|algorithm| algorithm.hex_len() == id.len())
        {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYY...`, e.g. `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
