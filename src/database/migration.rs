//! Schema migration management.
//!
//! The SR28 tables are created by the reversible migrations in `migrations/`.
//! Both the importer and the browse server bring the schema up to date before
//! doing anything else.

use sqlx::{PgPool, migrate::MigrateError, migrate::Migrator};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply every pending migration. Already-applied versions are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    log::info!("checking database migration state");

    MIGRATOR.run(pool).await?;

    log::info!("database migrations up to date");
    Ok(())
}

/// Revert every migration and apply them again.
///
/// **WARNING**: This drops every imported row. It is the way back to an empty
/// store before repeating a load, since imports never overwrite existing rows.
pub async fn reset_database(pool: &PgPool) -> Result<(), MigrateError> {
    log::info!("resetting database schema");

    MIGRATOR.undo(pool, 0).await?;
    log::info!("all migrations reverted, reapplying");

    MIGRATOR.run(pool).await?;

    log::info!("database schema recreated via migrations");
    Ok(())
}
