//! Campus Server — Application entry point.

use std::env;

use campus_content::config::ContentConfig;
use campus_content::leads::LeadService;
use campus_content::service::ContentService;
use campus_db::repository::{
    SurrealContentRepository, SurrealLeadRepository, SurrealTenantRepository,
};
use campus_db::{DbConfig, DbError, DbManager};
use tracing_subscriber::EnvFilter;

/// Build the database configuration from `CAMPUS_DB_*` environment
/// variables, falling back to local-development defaults.
fn db_config_from_env() -> DbConfig {
    let defaults = DbConfig::default();
    DbConfig {
        url: env::var("CAMPUS_DB_URL").unwrap_or(defaults.url),
        namespace: env::var("CAMPUS_DB_NAMESPACE").unwrap_or(defaults.namespace),
        database: env::var("CAMPUS_DB_DATABASE").unwrap_or(defaults.database),
        username: env::var("CAMPUS_DB_USERNAME").unwrap_or(defaults.username),
        password: env::var("CAMPUS_DB_PASSWORD").unwrap_or(defaults.password),
    }
}

#[tokio::main]
async fn main() -> Result<(), DbError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("campus=info")),
        )
        .json()
        .init();

    tracing::info!("Starting Campus server...");

    let config = db_config_from_env();
    let manager = DbManager::connect_and_migrate(&config).await?;
    let db = manager.client().clone();

    let _content = ContentService::new(
        SurrealTenantRepository::new(db.clone()),
        SurrealContentRepository::new(db.clone()),
        ContentConfig::default(),
    );
    let _leads = LeadService::new(
        SurrealTenantRepository::new(db.clone()),
        SurrealLeadRepository::new(db),
        ContentConfig::default(),
    );

    // TODO: mount the admin and public HTTP surfaces over these services
    // TODO: graceful shutdown on SIGTERM

    tracing::info!("Campus server stopped.");
    Ok(())
}
