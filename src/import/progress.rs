//! Operator-facing progress notifications.
//!
//! Progress is observability only: a failing writer never aborts a run.

use crate::import::error::ImportError;
use crate::import::plan::ResolvedJob;
use crate::import::stats::RunSummary;
use std::io::Write;

/// Hooks invoked by the runner around each file.
pub trait ImportProgress {
    fn file_started(&mut self, job: &ResolvedJob);
    fn file_finished(&mut self, job: &ResolvedJob, rows: u64);
    fn file_failed(&mut self, _job: &ResolvedJob, _error: &ImportError) {}
    fn run_finished(&mut self, _summary: &RunSummary) {}
}

/// Writes `Importing FD_GROUP.txt... Done! (25 rows)` lines to a stream.
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleProgress<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ImportProgress for ConsoleProgress<W> {
    fn file_started(&mut self, job: &ResolvedJob) {
        let _ = write!(self.out, "Importing {}... ", job.file_name);
        let _ = self.out.flush();
    }

    fn file_finished(&mut self, _job: &ResolvedJob, rows: u64) {
        let _ = writeln!(self.out, "Done! ({} rows)", rows);
    }

    fn file_failed(&mut self, _job: &ResolvedJob, _error: &ImportError) {
        let _ = writeln!(self.out, "failed!");
        let _ = self.out.flush();
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        let _ = writeln!(
            self.out,
            "Imported {} rows from {} files.",
            summary.total_rows(),
            summary.files.len()
        );
        let _ = self.out.flush();
    }
}

/// Routes notifications through the `log` facade.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn file_started(&mut self, job: &ResolvedJob) {
        log::info!("importing {} into {}", job.file_name, job.entity.table);
    }

    fn file_finished(&mut self, job: &ResolvedJob, rows: u64) {
        log::info!("imported {} rows from {}", rows, job.file_name);
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        log::info!(
            "import complete: {} rows from {} files",
            summary.total_rows(),
            summary.files.len()
        );
    }
}

/// Discards every notification.
#[derive(Debug, Default)]
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn file_started(&mut self, _job: &ResolvedJob) {}

    fn file_finished(&mut self, _job: &ResolvedJob, _rows: u64) {}
}
