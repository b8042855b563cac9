//! Checkout support
//!
//! Switching commits replaces the working tree with the target commit's file
//! table; `migration` plans which files go and which get written.

pub mod migration;
