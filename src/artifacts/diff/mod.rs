//! Text comparison
//!
//! - `line_diff`: line-by-line comparison of two arbitrary files

pub mod line_diff;
