//! Repository object types
//!
//! Everything the repository stores is an object addressed by the hash of its
//! content. There are two kinds:
//!
//! - **Blob**: the raw bytes of one file at one point in time
//! - **Commit**: a message, a timestamp, a single parent and a file table
//!   mapping file names to blob ids
//!
//! Both share one on-disk encoding: `<kind> <size>\0<payload>`.

pub mod blob;
pub mod commit;
pub mod hash_algorithm;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Number of characters shown for an abbreviated object id
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
