//! SurrealDB repository implementations.

mod content;
mod lead;
mod tenant;

pub use content::SurrealContentRepository;
pub use lead::SurrealLeadRepository;
pub use tenant::SurrealTenantRepository;
