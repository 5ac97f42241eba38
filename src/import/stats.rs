//! Import statistics tracking.
//!
//! A [`RunSummary`] only exists for a committed run; failed runs report their
//! error and nothing else.

use serde::Serialize;
use std::fmt;

/// Rows inserted from one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub file_name: String,
    pub table: &'static str,
    pub rows: u64,
}

/// Per-file counts of a committed run, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files: Vec<FileSummary>,
}

impl RunSummary {
    pub fn total_rows(&self) -> u64 {
        self.files.iter().map(|file| file.rows).sum()
    }

    /// Rows inserted into `table`, summed over every file that fed it.
    pub fn rows_for_table(&self, table: &str) -> u64 {
        self.files
            .iter()
            .filter(|file| file.table == table)
            .map(|file| file.rows)
            .sum()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Import summary:")?;
        for file in &self.files {
            writeln!(f, "  {:<14} -> {:<34} {:>8} rows", file.file_name, file.table, file.rows)?;
        }
        writeln!(f, "  total: {} rows", self.total_rows())?;
        Ok(())
    }
}
