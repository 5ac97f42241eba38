//! Importer configuration loaded from environment variables.

use crate::import::{ImportError, ImportResult};
use std::env;
use std::path::PathBuf;

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Settings for the `import_usda` binary.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub database_url: Option<String>,
    pub data_dir: PathBuf,
    pub max_connections: u32,
    pub bulk_session_tuning: bool,
    pub analyze_after_load: bool,
}

impl ImportConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            data_dir: PathBuf::from(env_string("USDA_DATA_DIR", "data/sr28")),
            max_connections: env_u32("USDA_MAX_CONNECTIONS", 2).max(1),
            bulk_session_tuning: env_bool("USDA_BULK_SESSION_TUNING", true),
            analyze_after_load: env_bool("USDA_ANALYZE_AFTER_LOAD", true),
        }
    }

    /// The connection string, or a configuration error when it is unset.
    pub fn require_database_url(&self) -> ImportResult<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ImportError::Config("DATABASE_URL is required".to_string()))
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
