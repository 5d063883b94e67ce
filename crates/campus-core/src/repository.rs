//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant-scoped repositories
//! require a `tenant_id` parameter to enforce data isolation.

use uuid::Uuid;

use crate::error::CampusResult;
use crate::lifecycle::{Environment, LifecycleState};
use crate::models::{
    content::{ContentKind, ContentPatch, ContentUnit, CreateContentUnit},
    lead::{CreateLead, Lead},
    tenant::{CreateTenant, Tenant, UpdateTenant},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Tenant registry (global scope)
// ---------------------------------------------------------------------------

pub trait TenantRepository: Send + Sync {
    /// Fails with `DuplicateSlug` if the slug is already taken.
    fn create(&self, input: CreateTenant) -> impl Future<Output = CampusResult<Tenant>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CampusResult<Tenant>> + Send;
    /// Slug lookup, used by all public-facing operations.
    fn get_by_slug(&self, slug: &str) -> impl Future<Output = CampusResult<Tenant>> + Send;
    /// Attribute mutation only; slugs are fixed at provisioning.
    fn update(
        &self,
        id: Uuid,
        input: UpdateTenant,
    ) -> impl Future<Output = CampusResult<Tenant>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = CampusResult<PaginatedResult<Tenant>>> + Send;
}

// ---------------------------------------------------------------------------
// Content unit store (tenant-scoped)
// ---------------------------------------------------------------------------

pub trait ContentRepository: Send + Sync {
    /// Always lands at `sandbox/draft`.
    fn create(
        &self,
        input: CreateContentUnit,
    ) -> impl Future<Output = CampusResult<ContentUnit>> + Send;

    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = CampusResult<ContentUnit>> + Send;

    /// Atomically apply a payload patch, guarded by a compare-and-set
    /// on the unit's lifecycle state.
    ///
    /// The write only takes effect if the persisted state still equals
    /// `from`; the unit's state is set to `to` in the same statement.
    /// An absent unit fails with `NotFound`; a unit whose state moved
    /// since the caller's read fails with `Conflict`.
    fn apply_patch(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        patch: ContentPatch,
        from: LifecycleState,
        to: LifecycleState,
    ) -> impl Future<Output = CampusResult<ContentUnit>> + Send;

    /// Atomically move a unit between lifecycle states.
    ///
    /// Compare-and-set semantics identical to [`Self::apply_patch`]:
    /// concurrent transitions on the same unit serialize such that
    /// exactly one writer observes the `from` state.
    fn transition(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        from: LifecycleState,
        to: LifecycleState,
    ) -> impl Future<Output = CampusResult<ContentUnit>> + Send;

    /// Unconditional removal, legal from any state. Idempotent:
    /// deleting an absent unit succeeds.
    fn delete(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = CampusResult<()>> + Send;

    /// CMS listing with optional environment and kind filters.
    fn list(
        &self,
        tenant_id: Uuid,
        environment: Option<Environment>,
        kind: Option<ContentKind>,
    ) -> impl Future<Output = CampusResult<Vec<ContentUnit>>> + Send;

    /// Public read path: only `live/published` units, ordered per
    /// kind (sections by ascending position, notices pinned-first
    /// then by reverse creation time). Read-only, no lock
    /// requirement, safe under arbitrary concurrency.
    fn list_published(
        &self,
        tenant_id: Uuid,
        kind: Option<ContentKind>,
    ) -> impl Future<Output = CampusResult<Vec<ContentUnit>>> + Send;
}

// ---------------------------------------------------------------------------
// Leads (tenant-scoped, append-style)
// ---------------------------------------------------------------------------

pub trait LeadRepository: Send + Sync {
    fn create(
        &self,
        tenant_id: Uuid,
        input: CreateLead,
    ) -> impl Future<Output = CampusResult<Lead>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = CampusResult<PaginatedResult<Lead>>> + Send;
}
