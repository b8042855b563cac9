//! Core utilities and shared types
//!
//! - `config`: repository config file and environment overrides
//! - `pager`: `Write` adapter for the minus pager

pub mod config;
pub mod pager;
