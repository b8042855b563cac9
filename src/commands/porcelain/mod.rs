//! User-facing commands
//!
//! - `init`: create the repository layout
//! - `add`: stage files
//! - `commit`: record the staged snapshot
//! - `log`: show history from HEAD
//! - `branch`: create or list branches
//! - `checkout`: switch to a branch or commit
//! - `merge`: three-way merge of a branch into HEAD
//! - `diff`: compare two files line by line

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod merge;
