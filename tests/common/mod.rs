#![allow(dead_code)]

pub mod command;
pub mod file;

/// Repository directory inside every test working tree
pub const REPOSITORY_DIR: &str = ".minigit";
