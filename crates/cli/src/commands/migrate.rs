//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! sync-cli migrate run
//!
//! # Show applied and pending migrations
//! sync-cli migrate info
//! ```
//!
//! # Environment Variables
//!
//! The same `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS` and `DB_NAME`
//! variables the server uses.
//!
//! # Migration Files
//!
//! Migrations live in `crates/sync/migrations/` and are embedded into the
//! binary at compile time.

use std::collections::HashSet;

use shopify_sync::config::{ConfigError, DatabaseConfig};
use shopify_sync::db;
use sqlx::migrate::{Migrate, MigrateError, Migrator};

static MIGRATOR: Migrator = sqlx::migrate!("../sync/migrations");

/// Errors from the migration commands.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] MigrateError),
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if configuration is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = DatabaseConfig::from_env()?;

    tracing::info!(host = %config.host, database = %config.name, "Connecting to database...");
    let pool = db::create_pool(&config).await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

/// Log every known migration and whether it has been applied.
///
/// # Errors
///
/// Returns `MigrationError` if configuration is missing or the database is
/// unreachable.
pub async fn info() -> Result<(), MigrationError> {
    let config = DatabaseConfig::from_env()?;
    let pool = db::create_pool(&config).await?;
    let mut conn = pool.acquire().await?;

    conn.ensure_migrations_table().await?;
    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    let mut pending = 0_usize;
    for migration in MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
    {
        let is_applied = applied.contains(&migration.version);
        if !is_applied {
            pending += 1;
        }
        tracing::info!(
            version = migration.version,
            description = %migration.description,
            applied = is_applied,
            "Migration"
        );
    }

    tracing::info!(pending, "Migration status");
    Ok(())
}
