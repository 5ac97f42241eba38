//! Session tuning for the import transaction.

use sqlx::{PgPool, Postgres, Transaction};

/// Transaction-scoped settings for a bulk load.
pub struct BulkLoadSession;

impl BulkLoadSession {
    /// Apply bulk load settings with `SET LOCAL`, so they end with the transaction.
    pub async fn apply(tx: &mut Transaction<'_, Postgres>) -> Result<(), sqlx::Error> {
        log::info!("applying bulk load session settings");

        // Larger sort and index build memory for the FK and primary key indexes
        sqlx::query("SET LOCAL maintenance_work_mem = '512MB'")
            .execute(&mut **tx)
            .await?;

        sqlx::query("SET LOCAL work_mem = '64MB'")
            .execute(&mut **tx)
            .await?;

        // The commit record still goes through the WAL; only the flush wait is skipped
        sqlx::query("SET LOCAL synchronous_commit = 'off'")
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Refresh planner statistics for freshly loaded tables.
    pub async fn analyze_tables(pool: &PgPool, tables: &[&str]) -> Result<(), sqlx::Error> {
        for table in tables {
            log::debug!("running ANALYZE on table: {}", table);
            let query = format!("ANALYZE {}", table);
            sqlx::query(&query).execute(pool).await?;
        }

        Ok(())
    }

    /// Report the settings currently in effect for the connection.
    pub async fn current_settings(
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<SessionSnapshot, sqlx::Error> {
        let work_mem: (String,) = sqlx::query_as("SHOW work_mem")
            .fetch_one(&mut **tx)
            .await?;

        let maintenance_work_mem: (String,) = sqlx::query_as("SHOW maintenance_work_mem")
            .fetch_one(&mut **tx)
            .await?;

        let synchronous_commit: (String,) = sqlx::query_as("SHOW synchronous_commit")
            .fetch_one(&mut **tx)
            .await?;

        Ok(SessionSnapshot {
            work_mem: work_mem.0,
            maintenance_work_mem: maintenance_work_mem.0,
            synchronous_commit: synchronous_commit.0,
        })
    }
}

/// Session settings observed inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub work_mem: String,
    pub maintenance_work_mem: String,
    pub synchronous_commit: String,
}

impl std::fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Session settings:")?;
        writeln!(f, "  work_mem: {}", self.work_mem)?;
        writeln!(f, "  maintenance_work_mem: {}", self.maintenance_work_mem)?;
        writeln!(f, "  synchronous_commit: {}", self.synchronous_commit)?;
        Ok(())
    }
}
