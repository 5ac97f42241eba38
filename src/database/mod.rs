//! Database management for the importer and the browse API.
//!
//! - `migration`: applies and reverts the schema migrations
//! - `session`: transaction-level settings and statistics for bulk loads

pub mod migration;
pub mod session;

pub use migration::{reset_database, run_migrations};
