//! SurrealDB implementation of [`ContentRepository`].
//!
//! Lifecycle writes (`apply_patch`, `transition`) are single UPDATE
//! statements guarded by `WHERE environment = $from AND status =
//! $from`. SurrealDB applies a statement atomically per record, so a
//! matching update is the compare-and-set the lifecycle engine
//! requires: of two concurrent writers starting from the same read,
//! exactly one matches the guard. An update that matches no row is
//! disambiguated by a re-read into `NotFound` (unit gone) or
//! `Conflict` (state moved since the caller's read).

use campus_core::error::CampusResult;
use campus_core::lifecycle::{ContentStatus, Environment, LifecycleState};
use campus_core::models::content::{
    ContentKind, ContentPatch, ContentPayload, ContentUnit, CreateContentUnit,
};
use campus_core::repository::ContentRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ContentRow {
    tenant_id: String,
    kind: String,
    environment: String,
    status: String,
    payload: serde_json::Value,
    pinned: bool,
    position: Option<i64>,
    updated_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ContentRowWithId {
    record_id: String,
    tenant_id: String,
    kind: String,
    environment: String,
    status: String,
    payload: serde_json::Value,
    pinned: bool,
    position: Option<i64>,
    updated_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_environment(s: &str) -> Result<Environment, DbError> {
    match s {
        "sandbox" => Ok(Environment::Sandbox),
        "live" => Ok(Environment::Live),
        other => Err(DbError::Corrupt(format!("unknown environment: {other}"))),
    }
}

fn parse_status(s: &str) -> Result<ContentStatus, DbError> {
    match s {
        "draft" => Ok(ContentStatus::Draft),
        "pending_approval" => Ok(ContentStatus::PendingApproval),
        "published" => Ok(ContentStatus::Published),
        other => Err(DbError::Corrupt(format!("unknown status: {other}"))),
    }
}

fn parse_kind(s: &str) -> Result<ContentKind, DbError> {
    match s {
        "section" => Ok(ContentKind::Section),
        "notice" => Ok(ContentKind::Notice),
        other => Err(DbError::Corrupt(format!("unknown content kind: {other}"))),
    }
}

fn decode_payload(value: serde_json::Value) -> Result<ContentPayload, DbError> {
    serde_json::from_value(value)
        .map_err(|e| DbError::Corrupt(format!("undecodable payload: {e}")))
}

fn encode_payload(payload: &ContentPayload) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(payload)
        .map_err(|e| DbError::Corrupt(format!("unencodable payload: {e}")))
}

impl ContentRow {
    fn into_unit(self, id: Uuid) -> Result<ContentUnit, DbError> {
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Corrupt(format!("invalid tenant UUID: {e}")))?;
        Ok(ContentUnit {
            id,
            tenant_id,
            kind: parse_kind(&self.kind)?,
            environment: parse_environment(&self.environment)?,
            status: parse_status(&self.status)?,
            payload: decode_payload(self.payload)?,
            pinned: self.pinned,
            position: self.position,
            updated_by: self.updated_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ContentRowWithId {
    fn try_into_unit(self) -> Result<ContentUnit, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid UUID: {e}")))?;
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Corrupt(format!("invalid tenant UUID: {e}")))?;
        Ok(ContentUnit {
            id,
            tenant_id,
            kind: parse_kind(&self.kind)?,
            environment: parse_environment(&self.environment)?,
            status: parse_status(&self.status)?,
            payload: decode_payload(self.payload)?,
            pinned: self.pinned,
            position: self.position,
            updated_by: self.updated_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the content unit store.
#[derive(Clone)]
pub struct SurrealContentRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealContentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Resolve an empty compare-and-set result: absent unit is
    /// `NotFound`, a unit in any other state lost the race.
    async fn cas_miss(&self, tenant_id: Uuid, id: Uuid) -> CampusResult<ContentUnit> {
        // Propagates NotFound if the unit is gone.
        self.get_by_id(tenant_id, id).await?;
        Err(DbError::Conflict {
            entity: "content_unit".into(),
            id: id.to_string(),
        }
        .into())
    }
}

impl<C: Connection> ContentRepository for SurrealContentRepository<C> {
    async fn create(&self, input: CreateContentUnit) -> CampusResult<ContentUnit> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let initial = LifecycleState::initial();
        let kind = input.payload.kind();
        let payload = encode_payload(&input.payload)?;

        let result = self
            .db
            .query(
                "CREATE type::record('content_unit', $id) SET \
                 tenant_id = $tenant_id, \
                 kind = $kind, \
                 environment = $environment, \
                 status = $status, \
                 payload = $payload, \
                 pinned = $pinned, \
                 position = $position, \
                 updated_by = $updated_by",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("kind", kind.as_str().to_string()))
            .bind(("environment", initial.environment.as_str().to_string()))
            .bind(("status", initial.status.as_str().to_string()))
            .bind(("payload", payload))
            .bind(("pinned", input.pinned))
            .bind(("position", input.position))
            .bind(("updated_by", input.updated_by))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ContentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or(DbError::NotFound {
            entity: "content_unit".into(),
            id: id_str,
        })?;

        Ok(row.into_unit(id)?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> CampusResult<ContentUnit> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('content_unit', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ContentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or(DbError::NotFound {
            entity: "content_unit".into(),
            id: id_str,
        })?;

        Ok(row.into_unit(id)?)
    }

    async fn apply_patch(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        patch: ContentPatch,
        from: LifecycleState,
        to: LifecycleState,
    ) -> CampusResult<ContentUnit> {
        let id_str = id.to_string();

        let mut sets = vec!["environment = $to_env", "status = $to_status"];
        if patch.payload.is_some() {
            sets.push("payload = $payload");
        }
        if patch.pinned.is_some() {
            sets.push("pinned = $pinned");
        }
        if patch.position.is_some() {
            sets.push("position = $position");
        }
        if patch.updated_by.is_some() {
            sets.push("updated_by = $updated_by");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('content_unit', $id) SET {} \
             WHERE tenant_id = $tenant_id \
             AND environment = $from_env AND status = $from_status",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("from_env", from.environment.as_str().to_string()))
            .bind(("from_status", from.status.as_str().to_string()))
            .bind(("to_env", to.environment.as_str().to_string()))
            .bind(("to_status", to.status.as_str().to_string()));

        if let Some(ref payload) = patch.payload {
            builder = builder.bind(("payload", encode_payload(payload)?));
        }
        if let Some(pinned) = patch.pinned {
            builder = builder.bind(("pinned", pinned));
        }
        if let Some(position) = patch.position {
            // Option<Option<i64>>: Some(Some(v)) = set, Some(None) = clear.
            builder = builder.bind(("position", position));
        }
        if let Some(updated_by) = patch.updated_by {
            builder = builder.bind(("updated_by", updated_by));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ContentRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(row.into_unit(id)?),
            None => self.cas_miss(tenant_id, id).await,
        }
    }

    async fn transition(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        from: LifecycleState,
        to: LifecycleState,
    ) -> CampusResult<ContentUnit> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('content_unit', $id) SET \
                 environment = $to_env, status = $to_status, \
                 updated_at = time::now() \
                 WHERE tenant_id = $tenant_id \
                 AND environment = $from_env AND status = $from_status",
            )
            .bind(("id", id_str))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("from_env", from.environment.as_str().to_string()))
            .bind(("from_status", from.status.as_str().to_string()))
            .bind(("to_env", to.environment.as_str().to_string()))
            .bind(("to_status", to.status.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ContentRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(row.into_unit(id)?),
            None => self.cas_miss(tenant_id, id).await,
        }
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> CampusResult<()> {
        // Unconditional and idempotent: deleting an absent unit is a
        // no-op, not an error.
        self.db
            .query(
                "DELETE type::record('content_unit', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        environment: Option<Environment>,
        kind: Option<ContentKind>,
    ) -> CampusResult<Vec<ContentUnit>> {
        let mut conditions = vec!["tenant_id = $tenant_id"];
        if environment.is_some() {
            conditions.push("environment = $environment");
        }
        if kind.is_some() {
            conditions.push("kind = $kind");
        }

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM content_unit \
             WHERE {} ORDER BY created_at ASC",
            conditions.join(" AND ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("tenant_id", tenant_id.to_string()));

        if let Some(environment) = environment {
            builder = builder.bind(("environment", environment.as_str().to_string()));
        }
        if let Some(kind) = kind {
            builder = builder.bind(("kind", kind.as_str().to_string()));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<ContentRowWithId> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| row.try_into_unit())
            .collect::<Result<Vec<_>, DbError>>()?)
    }

    async fn list_published(
        &self,
        tenant_id: Uuid,
        kind: Option<ContentKind>,
    ) -> CampusResult<Vec<ContentUnit>> {
        // Per-kind queries because each kind has its own display
        // order: sections by ascending position, notices pinned-first
        // then newest-first.
        const SECTIONS: &str = "\
            SELECT meta::id(id) AS record_id, * FROM content_unit \
            WHERE tenant_id = $tenant_id \
            AND environment = 'live' AND status = 'published' \
            AND kind = 'section' \
            ORDER BY position ASC";
        const NOTICES: &str = "\
            SELECT meta::id(id) AS record_id, * FROM content_unit \
            WHERE tenant_id = $tenant_id \
            AND environment = 'live' AND status = 'published' \
            AND kind = 'notice' \
            ORDER BY pinned DESC, created_at DESC";

        let queries: &[&str] = match kind {
            Some(ContentKind::Section) => &[SECTIONS],
            Some(ContentKind::Notice) => &[NOTICES],
            None => &[SECTIONS, NOTICES],
        };

        let mut units = Vec::new();
        for query in queries {
            let mut result = self
                .db
                .query(*query)
                .bind(("tenant_id", tenant_id.to_string()))
                .await
                .map_err(DbError::from)?;
            let rows: Vec<ContentRowWithId> = result.take(0).map_err(DbError::from)?;
            for row in rows {
                units.push(row.try_into_unit()?);
            }
        }

        Ok(units)
    }
}
