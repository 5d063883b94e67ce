//! Content unit domain model.
//!
//! A content unit is a page Section or a Notice subject to the
//! lifecycle engine. The payload is a discriminated union keyed by
//! content kind; shape validation happens at the service boundary so
//! invalid payloads never enter the state machine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::{ContentStatus, Environment, LifecycleState};

/// Concrete content unit variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Section,
    Notice,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Section => "section",
            ContentKind::Notice => "notice",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a page section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPayload {
    /// Page the section belongs to (e.g., `home`, `admissions`).
    pub page: String,
    /// Renderer key the website uses to pick a section component.
    pub variant: String,
    /// Free-form layout props consumed by the renderer.
    pub props: serde_json::Value,
}

/// Payload of a notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticePayload {
    pub title: String,
    pub body: String,
    pub attachment_url: Option<String>,
}

/// Type-specific content, discriminated by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentPayload {
    Section(SectionPayload),
    Notice(NoticePayload),
}

impl ContentPayload {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentPayload::Section(_) => ContentKind::Section,
            ContentPayload::Notice(_) => ContentKind::Notice,
        }
    }
}

/// A Section or Notice record subject to the lifecycle engine.
///
/// There is exactly one row per unit id: promotion to live flips the
/// `environment` field of this record in place, it never forks a
/// second live copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentUnit {
    pub id: Uuid,
    /// Owning tenant; immutable after creation.
    pub tenant_id: Uuid,
    pub kind: ContentKind,
    pub environment: Environment,
    pub status: ContentStatus,
    pub payload: ContentPayload,
    /// Notice ordering only: pinned notices sort first on the public
    /// site. Ignored for sections.
    pub pinned: bool,
    /// Section ordering only: ascending display order within the
    /// owning tenant+page. Ignored for notices.
    pub position: Option<i64>,
    /// Provenance metadata, not lifecycle-authoritative.
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentUnit {
    pub fn state(&self) -> LifecycleState {
        LifecycleState::new(self.environment, self.status)
    }
}

/// Fields required to create a new content unit.
///
/// Kind is derived from the payload; the initial state is always
/// `sandbox/draft`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContentUnit {
    pub tenant_id: Uuid,
    pub payload: ContentPayload,
    pub pinned: bool,
    pub position: Option<i64>,
    pub updated_by: Option<String>,
}

/// Partial update applied by an edit.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContentPatch {
    /// Replacement payload; must match the unit's kind.
    pub payload: Option<ContentPayload>,
    pub pinned: Option<bool>,
    /// `Some(Some(v))` = set, `Some(None)` = clear, `None` = no change.
    pub position: Option<Option<i64>>,
    pub updated_by: Option<String>,
}
