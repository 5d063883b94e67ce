//! Content lifecycle service — create/edit/submit/approve/reject
//! orchestration and the published read path.

use campus_core::error::{CampusError, CampusResult};
use campus_core::lifecycle::{Environment, LifecycleAction, LifecycleState};
use campus_core::models::content::{
    ContentKind, ContentPatch, ContentPayload, ContentUnit, CreateContentUnit,
};
use campus_core::repository::{ContentRepository, TenantRepository};
use tracing::info;
use uuid::Uuid;

use crate::config::ContentConfig;
use crate::error::ContentError;
use crate::validate;

/// The content lifecycle engine.
///
/// Generic over repository implementations so that the engine has no
/// dependency on the database crate. Every lifecycle write follows
/// the same discipline: read current state, check legality against
/// the pure state machine, then issue a compare-and-set guarded by
/// the state that was read. A concurrent writer that invalidates the
/// read surfaces as `Conflict`; an action illegal for the read state
/// surfaces as `IllegalTransition` without touching the store.
pub struct ContentService<T: TenantRepository, C: ContentRepository> {
    tenant_repo: T,
    content_repo: C,
    config: ContentConfig,
}

impl<T: TenantRepository, C: ContentRepository> ContentService<T, C> {
    pub fn new(tenant_repo: T, content_repo: C, config: ContentConfig) -> Self {
        Self {
            tenant_repo,
            content_repo,
            config,
        }
    }

    /// Create a unit at `sandbox/draft`.
    pub async fn create_unit(&self, input: CreateContentUnit) -> CampusResult<ContentUnit> {
        // 1. Reject malformed payloads before anything is written.
        validate::validate_payload(&input.payload, &self.config)?;
        if input.payload.kind() == ContentKind::Notice && input.position.is_some() {
            return Err(ContentError::PositionOnNotice.into());
        }
        if let ContentPayload::Section(section) = &input.payload {
            if let Some(position) = input.position {
                self.ensure_position_free(input.tenant_id, &section.page, position, None)
                    .await?;
            }
        }

        // 2. The owning tenant must exist.
        self.tenant_repo.get_by_id(input.tenant_id).await?;

        // 3. Persist; the store fixes the initial state.
        let unit = self.content_repo.create(input).await?;

        info!(
            unit_id = %unit.id,
            tenant_id = %unit.tenant_id,
            kind = %unit.kind,
            "Content unit created"
        );
        Ok(unit)
    }

    /// Apply a payload patch to a sandbox unit.
    ///
    /// Editing a unit under review demotes it to `draft` atomically
    /// with the payload write, so an approver can never approve
    /// content different from what was submitted. Published units are
    /// not editable.
    pub async fn edit_unit(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        patch: ContentPatch,
    ) -> CampusResult<ContentUnit> {
        // 1. Read current state and kind.
        let unit = self.content_repo.get_by_id(tenant_id, id).await?;

        // 2. Validate the patch against the unit's kind.
        if let Some(payload) = &patch.payload {
            if payload.kind() != unit.kind {
                return Err(ContentError::KindMismatch {
                    expected: unit.kind,
                    got: payload.kind(),
                }
                .into());
            }
            validate::validate_payload(payload, &self.config)?;
        }
        if unit.kind == ContentKind::Notice && matches!(patch.position, Some(Some(_))) {
            return Err(ContentError::PositionOnNotice.into());
        }
        if unit.kind == ContentKind::Section {
            let position = match patch.position {
                Some(p) => p,
                None => unit.position,
            };
            let page = match (&patch.payload, &unit.payload) {
                (Some(ContentPayload::Section(s)), _) => Some(s.page.clone()),
                (_, ContentPayload::Section(s)) => Some(s.page.clone()),
                _ => None,
            };
            if let (Some(position), Some(page)) = (position, page) {
                self.ensure_position_free(tenant_id, &page, position, Some(unit.id))
                    .await?;
            }
        }

        // 3. Published content is immutable; superseding it takes a
        //    fresh approved draft.
        let state = unit.state();
        if !state.is_editable() {
            return Err(CampusError::IllegalTransition {
                action: "edit",
                environment: state.environment,
                status: state.status,
            });
        }

        // 4. CAS write; any edit leaves the unit in draft.
        self.content_repo
            .apply_patch(tenant_id, id, patch, state, LifecycleState::initial())
            .await
    }

    /// Hand a draft to the approver: `draft` → `pending_approval`.
    pub async fn submit_unit(&self, tenant_id: Uuid, id: Uuid) -> CampusResult<ContentUnit> {
        self.act(tenant_id, id, LifecycleAction::Submit).await
    }

    /// Promote a pending unit to the live site:
    /// `sandbox/pending_approval` → `live/published`.
    pub async fn approve_unit(&self, tenant_id: Uuid, id: Uuid) -> CampusResult<ContentUnit> {
        let unit = self.act(tenant_id, id, LifecycleAction::Approve).await?;
        info!(
            unit_id = %unit.id,
            tenant_id = %unit.tenant_id,
            kind = %unit.kind,
            "Content unit promoted to live"
        );
        Ok(unit)
    }

    /// Send a pending unit back to its editor: → `sandbox/draft`.
    pub async fn reject_unit(&self, tenant_id: Uuid, id: Uuid) -> CampusResult<ContentUnit> {
        self.act(tenant_id, id, LifecycleAction::Reject).await
    }

    /// Remove a unit from any state. Idempotent.
    pub async fn delete_unit(&self, tenant_id: Uuid, id: Uuid) -> CampusResult<()> {
        self.content_repo.delete(tenant_id, id).await?;
        info!(unit_id = %id, tenant_id = %tenant_id, "Content unit deleted");
        Ok(())
    }

    /// CMS listing with optional environment and kind filters.
    pub async fn list_units(
        &self,
        tenant_id: Uuid,
        environment: Option<Environment>,
        kind: Option<ContentKind>,
    ) -> CampusResult<Vec<ContentUnit>> {
        self.content_repo.list(tenant_id, environment, kind).await
    }

    /// The public read path: only `live/published` units, ordered per
    /// kind.
    ///
    /// Fail-soft on an unknown slug: a misconfigured or
    /// not-yet-provisioned site renders its default page from an
    /// empty result instead of erroring. This is the one read path
    /// where absence is a normal condition.
    pub async fn get_published(
        &self,
        tenant_slug: &str,
        kind: Option<ContentKind>,
    ) -> CampusResult<Vec<ContentUnit>> {
        let tenant = match self.tenant_repo.get_by_slug(tenant_slug).await {
            Ok(tenant) => tenant,
            Err(CampusError::NotFound { .. }) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        self.content_repo.list_published(tenant.id, kind).await
    }

    /// Section positions are unique within a tenant+page, so the
    /// public ordering never ties between duplicates.
    async fn ensure_position_free(
        &self,
        tenant_id: Uuid,
        page: &str,
        position: i64,
        exclude: Option<Uuid>,
    ) -> CampusResult<()> {
        let sections = self
            .content_repo
            .list(tenant_id, None, Some(ContentKind::Section))
            .await?;
        for other in sections {
            if exclude == Some(other.id) || other.position != Some(position) {
                continue;
            }
            if let ContentPayload::Section(s) = &other.payload {
                if s.page == page {
                    return Err(ContentError::PositionTaken {
                        page: page.to_string(),
                        position,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Shared read → legality check → CAS discipline for the three
    /// lifecycle actions.
    async fn act(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        action: LifecycleAction,
    ) -> CampusResult<ContentUnit> {
        // 1. Read the most recently committed state.
        let unit = self.content_repo.get_by_id(tenant_id, id).await?;

        // 2. The pure state machine decides legality; an illegal pair
        //    fails here with the current state and no write happens.
        let next = unit.state().apply(action)?;

        // 3. CAS keyed on the state we read. A concurrent writer that
        //    got there first turns this into `Conflict`.
        self.content_repo
            .transition(tenant_id, id, unit.state(), next)
            .await
    }
}
