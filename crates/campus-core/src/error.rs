//! Error types for the Campus system.

use thiserror::Error;

use crate::lifecycle::{ContentStatus, Environment};

#[derive(Debug, Error)]
pub enum CampusError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Slug already in use: {slug}")]
    DuplicateSlug { slug: String },

    /// The requested action is not legal from the unit's current
    /// state. Carries that state so the caller can resynchronize
    /// its view before retrying anything.
    #[error("Illegal transition: cannot {action} a unit in {environment}/{status}")]
    IllegalTransition {
        action: &'static str,
        environment: Environment,
        status: ContentStatus,
    },

    /// Lost a compare-and-set race against a concurrent writer.
    /// The caller should re-fetch current state and may retry.
    #[error("Conflict: {entity} {id} was modified concurrently")]
    Conflict { entity: String, id: String },

    #[error("Validation failed on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CampusResult<T> = Result<T, CampusError>;
