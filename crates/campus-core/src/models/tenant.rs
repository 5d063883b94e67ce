//! Tenant domain model.
//!
//! A tenant is one school's isolated content namespace. Every content
//! unit and lead is scoped to exactly one tenant; no query may cross
//! tenant boundaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One school's isolated namespace.
///
/// The slug is the public, URL-safe identifier the website renderer
/// resolves a site by; it is unique across the whole installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    /// School display name.
    pub name: String,
    /// URL-safe unique identifier (e.g., `north-ridge-primary`).
    pub slug: String,
    /// Display/branding attributes (colors, logo URL, footer text).
    pub branding: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to provision a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub slug: String,
    pub branding: Option<serde_json::Value>,
}

/// Fields that can be updated on an existing tenant.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateTenant {
    pub name: Option<String>,
    pub branding: Option<serde_json::Value>,
}
