use rocket_db_pools::{Database, sqlx};

/// Read pool for the browse API, configured under `databases.usda_db`.
#[derive(Database)]
#[database("usda_db")]
pub struct UsdaDb(sqlx::PgPool);
