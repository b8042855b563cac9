//! Content hashing
//!
//! Addresses only need to be a deterministic, fixed-width function of the
//! bytes; neither algorithm is meant to resist deliberate collisions. The
//! choice is made once at `init` time and frozen in the repository config.

use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

const DJB2_SEED: u64 = 5381;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Djb2,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 2] = [HashAlgorithm::Sha1, HashAlgorithm::Djb2];

    /// Width of the hex digest
    pub fn hex_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 40,
            HashAlgorithm::Djb2 => 16,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Djb2 => "djb2",
        }
    }

    pub fn digest(&self, data: &[u8]) -> anyhow::Result<ObjectId> {
        let hex = match self {
            HashAlgorithm::Sha1 => {
                let mut hasher = Sha1::new();
                hasher.update(data);
                format!("{:x}", hasher.finalize())
            }
            HashAlgorithm::Djb2 => {
                let hash = data.iter().fold(DJB2_SEED, |hash, byte| {
                    hash.wrapping_shl(5)
                        .wrapping_add(hash)
                        .wrapping_add(u64::from(*byte))
                });
                format!("{hash:016x}")
            }
        };

        ObjectId::try_parse(hex)
    }
}

impl TryFrom<&str> for HashAlgorithm {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sha1" => Ok(HashAlgorithm::Sha1),
            "djb2" => Ok(HashAlgorithm::Djb2),
            other => Err(anyhow::anyhow!("Unknown hash algorithm: {}", other)),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
