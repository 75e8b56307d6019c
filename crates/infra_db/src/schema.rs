//! Schema creation
//!
//! The schema script only uses `IF NOT EXISTS` statements, so it is applied
//! on every startup instead of tracking migration versions.

use tracing::info;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

const INITIAL_SCHEMA: &str = include_str!("../migrations/0001_initial_schema.sql");

/// Creates the users, rooms, bills and bill_sequences tables if missing
pub async fn ensure_schema(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::raw_sql(INITIAL_SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::SchemaFailed(e.to_string()))?;

    info!("Database schema ready");
    Ok(())
}
