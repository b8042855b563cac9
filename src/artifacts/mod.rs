//! Repository data structures and algorithms
//!
//! - `branch`: branch names and the HEAD representation
//! - `checkout`: two-phase working tree reconcile plan
//! - `core`: configuration and the pager adapter
//! - `diff`: index-aligned line comparison
//! - `log`: lazy walk over commit parents
//! - `merge`: merge base search and per-file three-way decisions
//! - `objects`: object ids, hash algorithms, blobs and commits

pub mod branch;
pub mod checkout;
pub mod core;
pub mod diff;
pub mod log;
pub mod merge;
pub mod objects;
