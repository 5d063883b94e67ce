//! Lead capture — the public inquiry write path.
//!
//! Deliberately decoupled from the lifecycle engine: capturing a lead
//! resolves the tenant and appends a record, nothing more. Unlike the
//! published read path, an unknown slug here is an error — a form
//! post to a nonexistent school has no placeholder to fall back on.

use campus_core::error::CampusResult;
use campus_core::models::lead::{CreateLead, Lead};
use campus_core::repository::{LeadRepository, PaginatedResult, Pagination, TenantRepository};
use tracing::info;
use uuid::Uuid;

use crate::config::ContentConfig;
use crate::validate;

/// Inquiry capture and listing.
pub struct LeadService<T: TenantRepository, L: LeadRepository> {
    tenant_repo: T,
    lead_repo: L,
    config: ContentConfig,
}

impl<T: TenantRepository, L: LeadRepository> LeadService<T, L> {
    pub fn new(tenant_repo: T, lead_repo: L, config: ContentConfig) -> Self {
        Self {
            tenant_repo,
            lead_repo,
            config,
        }
    }

    /// Record an inquiry submitted through a school's public form.
    pub async fn capture(&self, tenant_slug: &str, input: CreateLead) -> CampusResult<Lead> {
        // 1. Reject malformed submissions.
        validate::validate_lead(&input, &self.config)?;

        // 2. Resolve the school; NotFound propagates.
        let tenant = self.tenant_repo.get_by_slug(tenant_slug).await?;

        // 3. Append.
        let lead = self.lead_repo.create(tenant.id, input).await?;

        info!(lead_id = %lead.id, tenant_id = %lead.tenant_id, "Lead captured");
        Ok(lead)
    }

    /// CMS listing, newest first.
    pub async fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> CampusResult<PaginatedResult<Lead>> {
        self.lead_repo.list(tenant_id, pagination).await
    }
}
