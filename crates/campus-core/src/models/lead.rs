//! Admissions lead domain model.
//!
//! Leads come from the public inquiry form. This write path is
//! deliberately decoupled from the lifecycle engine: capturing a lead
//! never reads or mutates content units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A public inquiry submitted through a school's website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Fields posted by the inquiry form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}
