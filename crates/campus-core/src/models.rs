//! Domain models for Campus.
//!
//! These are the core types shared across all crates.

pub mod content;
pub mod lead;
pub mod tenant;
