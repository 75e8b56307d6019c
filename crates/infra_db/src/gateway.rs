//! Persistence gateway
//!
//! Three operations over parameterized SQL: `execute` for writes,
//! `query_one` and `query_many` for typed reads. Each has a `*_with` twin
//! that runs on any executor, including an open transaction:
//!
//! ```rust,ignore
//! let mut tx = gateway.begin().await?;
//! Gateway::execute_with(&mut *tx, "UPDATE rooms SET is_active = 0 WHERE id = ?1", &[id.into()]).await?;
//! tx.commit().await?;
//! ```
//!
//! The gateway never retries; callers decide what to do with an error.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Executor, FromRow, Sqlite, Transaction};

use core_kernel::{BillId, RoomId, UserId};

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

/// A bound statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        SqlValue::Integer(i64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

/// Decimals are stored as text to keep every digit
impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<RoomId> for SqlValue {
    fn from(v: RoomId) -> Self {
        SqlValue::Integer(v.value())
    }
}

impl From<BillId> for SqlValue {
    fn from(v: BillId) -> Self {
        SqlValue::Integer(v.value())
    }
}

impl From<UserId> for SqlValue {
    fn from(v: UserId) -> Self {
        SqlValue::Integer(v.value())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// Outcome of a row-affecting statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Row id of the last inserted row (0 if the statement inserted nothing)
    pub inserted_id: i64,
    pub rows_affected: u64,
}

/// Parameterized statement runner over the SQLite pool
#[derive(Debug, Clone)]
pub struct Gateway {
    pool: DatabasePool,
}

impl Gateway {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Opens a transaction for use with the `*_with` operations
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, DatabaseError> {
        Ok(self.pool.begin().await?)
    }

    /// Runs a write statement
    pub async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<ExecResult, DatabaseError> {
        Self::execute_with(&self.pool, sql, params).await
    }

    /// Fetches at most one row
    pub async fn query_one<T>(&self, sql: &str, params: &[SqlValue]) -> Result<Option<T>, DatabaseError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        Self::query_one_with(&self.pool, sql, params).await
    }

    /// Fetches all rows
    pub async fn query_many<T>(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<T>, DatabaseError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        Self::query_many_with(&self.pool, sql, params).await
    }

    pub async fn execute_with<'c, E>(executor: E, sql: &str, params: &[SqlValue]) -> Result<ExecResult, DatabaseError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let result = bind_query(sqlx::query(sql), params).execute(executor).await?;
        Ok(ExecResult {
            inserted_id: result.last_insert_rowid(),
            rows_affected: result.rows_affected(),
        })
    }

    pub async fn query_one_with<'c, E, T>(executor: E, sql: &str, params: &[SqlValue]) -> Result<Option<T>, DatabaseError>
    where
        E: Executor<'c, Database = Sqlite>,
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        Ok(bind_query_as(sqlx::query_as::<_, T>(sql), params)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn query_many_with<'c, E, T>(executor: E, sql: &str, params: &[SqlValue]) -> Result<Vec<T>, DatabaseError>
    where
        E: Executor<'c, Database = Sqlite>,
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        Ok(bind_query_as(sqlx::query_as::<_, T>(sql), params)
            .fetch_all(executor)
            .await?)
    }

    /// Round trip used by readiness checks
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn bind_query<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    params.iter().fold(query, |q, value| match value.clone() {
        SqlValue::Null => q.bind(None::<i64>),
        SqlValue::Integer(v) => q.bind(v),
        SqlValue::Real(v) => q.bind(v),
        SqlValue::Text(v) => q.bind(v),
        SqlValue::Bool(v) => q.bind(v),
        SqlValue::Date(v) => q.bind(v),
        SqlValue::Timestamp(v) => q.bind(v),
    })
}

fn bind_query_as<'q, T>(
    query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    params: &[SqlValue],
) -> QueryAs<'q, Sqlite, T, SqliteArguments<'q>> {
    params.iter().fold(query, |q, value| match value.clone() {
        SqlValue::Null => q.bind(None::<i64>),
        SqlValue::Integer(v) => q.bind(v),
        SqlValue::Real(v) => q.bind(v),
        SqlValue::Text(v) => q.bind(v),
        SqlValue::Bool(v) => q.bind(v),
        SqlValue::Date(v) => q.bind(v),
        SqlValue::Timestamp(v) => q.bind(v),
    })
}

/// Single-column `flag` row for `SELECT EXISTS(...) AS flag` queries
#[derive(Debug, Clone, Copy, FromRow)]
pub struct FlagRow {
    pub flag: bool,
}
