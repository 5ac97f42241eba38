//! Bulk insert of a prepared batch.

use crate::import::data_structures::{ColumnData, RowBatch};
use sqlx::PgConnection;

/// Insert every row of `batch` with one statement.
///
/// Uses UNNEST so the statement takes one array parameter per column no matter
/// how many rows the file has. Nothing is skipped on conflict: a duplicate key
/// or any other rejected value fails the whole batch.
///
/// # Returns
/// Number of rows inserted
pub async fn insert_rows_batch(
    conn: &mut PgConnection,
    batch: &RowBatch,
) -> Result<u64, sqlx::Error> {
    if batch.is_empty() {
        return Ok(0);
    }

    let sql = batch.insert_sql();
    log::trace!("{}", sql);

    let mut query = sqlx::query(&sql);
    for column in &batch.columns {
        query = match column {
            ColumnData::Text(values) => query.bind(values),
            ColumnData::Bool(values) => query.bind(values),
        };
    }

    let result = query.execute(&mut *conn).await?;
    let inserted = result.rows_affected();

    log::trace!("bulk inserted {} rows into {}", inserted, batch.entity.table);
    Ok(inserted)
}

/// Count rows currently stored for a table.
pub async fn count_rows(conn: &mut PgConnection, table: &str) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    sqlx::query_scalar(&sql).fetch_one(&mut *conn).await
}
