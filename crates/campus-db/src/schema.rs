//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints, so a row can never hold an `(environment,
//! status)` value outside the lifecycle engine's vocabulary.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Tenants (global scope, one per school)
-- =======================================================================
DEFINE TABLE tenant SCHEMAFULL;
DEFINE FIELD name ON TABLE tenant TYPE string;
DEFINE FIELD slug ON TABLE tenant TYPE string;
DEFINE FIELD branding ON TABLE tenant TYPE object FLEXIBLE DEFAULT {};
DEFINE FIELD created_at ON TABLE tenant TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE tenant TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_tenant_slug ON TABLE tenant COLUMNS slug UNIQUE;

-- =======================================================================
-- Content units (tenant scope)
-- =======================================================================
DEFINE TABLE content_unit SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE content_unit TYPE string;
DEFINE FIELD kind ON TABLE content_unit TYPE string \
    ASSERT $value IN ['section', 'notice'];
DEFINE FIELD environment ON TABLE content_unit TYPE string \
    ASSERT $value IN ['sandbox', 'live'];
DEFINE FIELD status ON TABLE content_unit TYPE string \
    ASSERT $value IN ['draft', 'pending_approval', 'published'];
DEFINE FIELD payload ON TABLE content_unit TYPE object FLEXIBLE;
DEFINE FIELD pinned ON TABLE content_unit TYPE bool DEFAULT false;
DEFINE FIELD position ON TABLE content_unit TYPE option<int>;
DEFINE FIELD updated_by ON TABLE content_unit TYPE option<string>;
DEFINE FIELD created_at ON TABLE content_unit TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE content_unit TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_content_tenant_env ON TABLE content_unit \
    COLUMNS tenant_id, environment;
DEFINE INDEX idx_content_tenant_kind ON TABLE content_unit \
    COLUMNS tenant_id, kind;

-- =======================================================================
-- Leads (tenant scope, append-only)
-- =======================================================================
DEFINE TABLE lead SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD tenant_id ON TABLE lead TYPE string;
DEFINE FIELD name ON TABLE lead TYPE string;
DEFINE FIELD email ON TABLE lead TYPE string;
DEFINE FIELD phone ON TABLE lead TYPE option<string>;
DEFINE FIELD message ON TABLE lead TYPE string;
DEFINE FIELD created_at ON TABLE lead TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_lead_tenant_time ON TABLE lead \
    COLUMNS tenant_id, created_at;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}
