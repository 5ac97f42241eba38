//! Run controller: executes an [`ImportPlan`] as one atomic unit.
//!
//! The plan is resolved before anything is opened. Every file is then read,
//! coerced and bulk-inserted in order on a single transaction. The first
//! failure rolls the transaction back, so a failed run leaves the store exactly
//! as it was; there is no partial success and no resume.

use crate::config::ImportConfig;
use crate::database::session::BulkLoadSession;
use crate::import::data_structures::RowBatch;
use crate::import::database_operations;
use crate::import::error::ImportResult;
use crate::import::plan::{ImportPlan, ResolvedJob};
use crate::import::progress::{ImportProgress, SilentProgress};
use crate::import::reader::{self, SourceFormat};
use crate::import::stats::{FileSummary, RunSummary};
use sqlx::{PgPool, Postgres, Transaction};
use std::path::PathBuf;

/// Settings for a single run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory holding the source files named by the plan.
    pub data_dir: PathBuf,
    pub format: SourceFormat,
    /// Apply `SET LOCAL` bulk-load settings to the run's transaction.
    pub session_tuning: bool,
    /// Run `ANALYZE` on the loaded tables after commit.
    pub analyze_after_load: bool,
}

impl RunOptions {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            format: SourceFormat::SR28,
            session_tuning: false,
            analyze_after_load: false,
        }
    }
}

impl From<&ImportConfig> for RunOptions {
    fn from(config: &ImportConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            format: SourceFormat::SR28,
            session_tuning: config.bulk_session_tuning,
            analyze_after_load: config.analyze_after_load,
        }
    }
}

pub struct ImportRunner<P: ImportProgress = SilentProgress> {
    pool: PgPool,
    options: RunOptions,
    progress: P,
}

impl ImportRunner<SilentProgress> {
    pub fn silent(pool: PgPool, options: RunOptions) -> Self {
        Self::new(pool, options, SilentProgress)
    }
}

impl<P: ImportProgress> ImportRunner<P> {
    pub fn new(pool: PgPool, options: RunOptions, progress: P) -> Self {
        Self {
            pool,
            options,
            progress,
        }
    }

    pub fn into_progress(self) -> P {
        self.progress
    }

    /// Load every file of `plan` inside one transaction.
    ///
    /// # Returns
    /// Per-file row counts once the transaction has committed
    pub async fn run(&mut self, plan: &ImportPlan) -> ImportResult<RunSummary> {
        let jobs = plan.resolve()?;

        log::info!(
            "starting import of {} files from {}",
            jobs.len(),
            self.options.data_dir.display()
        );

        let mut tx = self.pool.begin().await?;

        if self.options.session_tuning {
            BulkLoadSession::apply(&mut tx).await?;
        }

        let mut summary = RunSummary::default();
        for job in &jobs {
            match self.import_file(&mut tx, job).await {
                Ok(rows) => summary.files.push(FileSummary {
                    file_name: job.file_name.clone(),
                    table: job.entity.table,
                    rows,
                }),
                Err(err) => {
                    self.progress.file_failed(job, &err);
                    log::error!("import of {} failed, rolling back run: {}", job.file_name, err);
                    if let Err(rollback_err) = tx.rollback().await {
                        log::warn!("rollback after failed import returned: {}", rollback_err);
                    }
                    return Err(err);
                }
            }
        }

        tx.commit().await?;
        log::info!("import committed: {} rows", summary.total_rows());

        if self.options.analyze_after_load {
            let tables: Vec<&str> = jobs.iter().map(|job| job.entity.table).collect();
            if let Err(err) = BulkLoadSession::analyze_tables(&self.pool, &tables).await {
                log::warn!("ANALYZE after import failed: {}", err);
            }
        }

        self.progress.run_finished(&summary);
        Ok(summary)
    }

    /// Read one file and insert all of its rows with a single statement.
    async fn import_file(
        &mut self,
        tx: &mut Transaction<'_, Postgres>,
        job: &ResolvedJob,
    ) -> ImportResult<u64> {
        self.progress.file_started(job);

        let path = self.options.data_dir.join(&job.file_name);
        let rows = reader::read_rows(&path, &job.fields, &self.options.format)?;
        log::debug!("{}: {} rows parsed for {}", job.file_name, rows.len(), job.entity.table);

        let batch = RowBatch::from_rows(job.entity, &job.fields, rows);
        let inserted = database_operations::insert_rows_batch(&mut **tx, &batch).await?;

        self.progress.file_finished(job, inserted);
        Ok(inserted)
    }
}
