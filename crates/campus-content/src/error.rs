//! Content service error types.

use campus_core::error::CampusError;
use campus_core::models::content::ContentKind;
use thiserror::Error;

/// Validation failures raised at the service boundary.
///
/// These all fold into [`CampusError::Validation`] with field-level
/// detail; invalid payloads are rejected before they can enter the
/// lifecycle state machine.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("payload kind {got} does not match unit kind {expected}")]
    KindMismatch {
        expected: ContentKind,
        got: ContentKind,
    },

    #[error("{0} must not be empty")]
    FieldEmpty(&'static str),

    #[error("{field} exceeds {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("section props exceed {max} bytes")]
    PropsTooLarge { max: usize },

    #[error("section props must be a JSON object")]
    PropsNotObject,

    #[error("position only applies to sections")]
    PositionOnNotice,

    #[error("position {position} is already taken on page {page}")]
    PositionTaken { page: String, position: i64 },

    #[error("email address is not valid")]
    InvalidEmail,
}

impl ContentError {
    /// The offending field, for `CampusError::Validation`.
    fn field(&self) -> &'static str {
        match self {
            ContentError::KindMismatch { .. } => "payload",
            ContentError::FieldEmpty(field) => field,
            ContentError::FieldTooLong { field, .. } => field,
            ContentError::PropsTooLarge { .. } | ContentError::PropsNotObject => "props",
            ContentError::PositionOnNotice => "position",
            ContentError::PositionTaken { .. } => "position",
            ContentError::InvalidEmail => "email",
        }
    }
}

impl From<ContentError> for CampusError {
    fn from(err: ContentError) -> Self {
        CampusError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
