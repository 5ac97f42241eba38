//! Bulk import of the SR28 flat files.
//!
//! The pipeline for each file is:
//!
//! 1. **Reading** (`reader`) - `^`/`~` framed, Windows-1252 records
//! 2. **Coercion** (`coerce`) - `Y`/`N` flags to booleans, empty fields to NULL
//! 3. **Batching** (`data_structures`) - rows transposed into columnar vectors
//! 4. **Insertion** (`database_operations`) - one UNNEST insert per file
//!
//! The `runner` drives an ordered `plan` of files through that pipeline on a
//! single transaction and reports through `progress`. Any error in any file
//! rolls the whole run back.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use usda_nutrition::import::{ImportPlan, ImportRunner, RunOptions};
//! use usda_nutrition::import::progress::ConsoleProgress;
//!
//! let mut runner = ImportRunner::new(pool, RunOptions::new("data/sr28"), ConsoleProgress::stdout());
//! let summary = runner.run(&ImportPlan::sr28()).await?;
//! println!("{summary}");
//! ```

pub mod coerce;
pub mod data_structures;
pub mod database_operations;
pub mod error;
pub mod plan;
pub mod progress;
pub mod reader;
pub mod runner;
pub mod stats;

pub use error::{ErrorClass, ImportError, ImportResult};
pub use plan::{ImportJob, ImportPlan};
pub use runner::{ImportRunner, RunOptions};
pub use stats::RunSummary;
