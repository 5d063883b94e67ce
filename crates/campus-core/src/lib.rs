//! Campus Core — domain models, the content lifecycle state machine,
//! and repository trait definitions.
//!
//! This crate is pure domain logic: no I/O, no database dependency.
//! Persistence lives in `campus-db`; orchestration in
//! `campus-content`.

pub mod error;
pub mod lifecycle;
pub mod models;
pub mod repository;
