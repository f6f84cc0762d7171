//! Common utilities for the slurry crates.
//!
//! This crate provides shared infrastructure used by the scanner and parser:
//! - **Warning System** - deduplicated, coloured stderr output for repairs

pub mod warning;
