//! Campus Content — the content lifecycle engine and lead capture.
//!
//! Services here are generic over the `campus-core` repository traits
//! and carry no dependency on the database crate. Orchestration
//! pattern: read current state, check legality against the pure state
//! machine, then hand the store a compare-and-set write guarded by the
//! state that was read.

pub mod config;
pub mod error;
pub mod leads;
pub mod service;
pub mod validate;

pub use config::ContentConfig;
pub use error::ContentError;
pub use leads::LeadService;
pub use service::ContentService;
