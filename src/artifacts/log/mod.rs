//! Commit history traversal
//!
//! History is a singly linked list through each commit's `parent` field, so
//! walking it is a plain iterator over the object database.

pub mod ancestors;
