//! Database-specific error types and conversions.

use campus_core::error::CampusError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// A compare-and-set update matched no row because the record's
    /// state changed since the caller's read.
    #[error("Concurrent modification of {entity} {id}")]
    Conflict { entity: String, id: String },

    /// A stored row failed to decode into its domain type.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<DbError> for CampusError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CampusError::NotFound { entity, id },
            DbError::Conflict { entity, id } => CampusError::Conflict { entity, id },
            other => CampusError::Database(other.to_string()),
        }
    }
}
