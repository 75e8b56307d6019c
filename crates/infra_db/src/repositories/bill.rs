//! Bill repository implementation
//!
//! Bills are append-only. Numbers come from `bill_sequences`, one row per
//! business day, advanced with an atomic upsert. Statements that must run
//! together with the insert take an executor so they can share a
//! transaction.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, Sqlite};

use crate::error::DatabaseError;
use crate::gateway::{FlagRow, Gateway, SqlValue};
use crate::repositories::room::{DbRoomType, OVERLAP_SQL};

const BILL_COLUMNS: &str = r#"
    b.id, b.bill_number, b.room_id, b.customer_name, b.customer_phone,
    b.customer_address, b.check_in_date, b.check_out_date, b.total_days,
    b.price_per_day, b.total_amount, b.created_by, b.created_at
"#;

/// Highest sequence already used in `bills` for a day prefix; seeds the
/// counter for databases written before `bill_sequences` existed
const EXISTING_MAX_SQL: &str = r#"
    (SELECT COALESCE(MAX(CAST(substr(bill_number, 11) AS INTEGER)), 0)
     FROM bills WHERE bill_number LIKE ?2)
"#;

#[derive(Debug, Clone, sqlx::FromRow)]
struct SequenceRow {
    last_seq: i64,
}

/// Repository for the `bills` and `bill_sequences` tables
#[derive(Debug, Clone)]
pub struct BillRepository {
    gateway: Gateway,
}

impl BillRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Advances and returns the day's sequence
    ///
    /// `day_key` is `YYYYMMDD`, `prefix` the matching `VBYYYYMMDD`.
    pub async fn next_sequence<'c, E>(executor: E, day_key: &str, prefix: &str) -> Result<i64, DatabaseError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let sql = format!(
            r#"
            INSERT INTO bill_sequences (day, last_seq)
            VALUES (?1, {EXISTING_MAX_SQL} + 1)
            ON CONFLICT (day) DO UPDATE SET last_seq = last_seq + 1
            RETURNING last_seq
            "#
        );
        let row: Option<SequenceRow> =
            Gateway::query_one_with(executor, &sql, &[day_key.into(), like_prefix(prefix)]).await?;
        row.map(|r| r.last_seq)
            .ok_or_else(|| DatabaseError::QueryFailed("sequence upsert returned no row".to_string()))
    }

    /// Moves the day's sequence to at least `sequence`
    pub async fn bump_sequence<'c, E>(executor: E, day_key: &str, prefix: &str, sequence: i64) -> Result<(), DatabaseError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let sql = format!(
            r#"
            INSERT INTO bill_sequences (day, last_seq)
            VALUES (?1, MAX(?3, {EXISTING_MAX_SQL}))
            ON CONFLICT (day) DO UPDATE SET last_seq = MAX(last_seq, excluded.last_seq)
            "#
        );
        Gateway::execute_with(executor, &sql, &[day_key.into(), like_prefix(prefix), sequence.into()]).await?;
        Ok(())
    }

    pub async fn stay_overlaps<'c, E>(
        executor: E,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool, DatabaseError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let row: Option<FlagRow> =
            Gateway::query_one_with(executor, OVERLAP_SQL, &[room_id.into(), check_in.into(), check_out.into()])
                .await?;
        Ok(row.map(|r| r.flag).unwrap_or(false))
    }

    pub async fn user_exists<'c, E>(executor: E, user_id: i64) -> Result<bool, DatabaseError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let row: Option<FlagRow> = Gateway::query_one_with(
            executor,
            "SELECT EXISTS (SELECT 1 FROM users WHERE id = ?1) AS flag",
            &[user_id.into()],
        )
        .await?;
        Ok(row.map(|r| r.flag).unwrap_or(false))
    }

    /// Inserts a bill and returns its id
    pub async fn insert<'c, E>(executor: E, bill: &NewBillRow) -> Result<i64, DatabaseError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let result = Gateway::execute_with(
            executor,
            r#"
            INSERT INTO bills (
                bill_number, room_id, customer_name, customer_phone, customer_address,
                check_in_date, check_out_date, total_days, price_per_day, total_amount,
                created_by, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            &[
                bill.bill_number.clone().into(),
                bill.room_id.into(),
                bill.customer_name.clone().into(),
                bill.customer_phone.clone().into(),
                bill.customer_address.clone().into(),
                bill.check_in_date.into(),
                bill.check_out_date.into(),
                bill.total_days.into(),
                bill.price_per_day.into(),
                bill.total_amount.into(),
                bill.created_by.into(),
                bill.created_at.into(),
            ],
        )
        .await?;
        Ok(result.inserted_id)
    }

    /// Bills joined with room and creator, newest first
    pub async fn list_with_details(&self) -> Result<Vec<BillDetailsRow>, DatabaseError> {
        let sql = format!("{} ORDER BY b.created_at DESC, b.id DESC", details_select());
        self.gateway.query_many(&sql, &[]).await
    }

    pub async fn get_with_details(&self, id: i64) -> Result<Option<BillDetailsRow>, DatabaseError> {
        let sql = format!("{} WHERE b.id = ?1", details_select());
        self.gateway.query_one(&sql, &[id.into()]).await
    }

    /// Bills with `from_number <= bill_number < until_number`, in number order
    pub async fn list_by_number_range(&self, from_number: &str, until_number: &str) -> Result<Vec<BillRow>, DatabaseError> {
        let sql = format!(
            "SELECT {BILL_COLUMNS} FROM bills b WHERE b.bill_number >= ?1 AND b.bill_number < ?2 ORDER BY b.bill_number"
        );
        self.gateway
            .query_many(&sql, &[from_number.into(), until_number.into()])
            .await
    }
}

fn details_select() -> String {
    format!(
        r#"
        SELECT {BILL_COLUMNS},
               r.room_number, r.room_type, u.username AS created_by_username
        FROM bills b
        JOIN rooms r ON r.id = b.room_id
        JOIN users u ON u.id = b.created_by
        "#
    )
}

fn like_prefix(prefix: &str) -> SqlValue {
    SqlValue::Text(format!("{}%", prefix))
}

/// Row of the `bills` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BillRow {
    pub id: i64,
    pub bill_number: String,
    pub room_id: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_days: i64,
    pub price_per_day: String,
    pub total_amount: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Bill row joined with its room and issuing user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BillDetailsRow {
    #[sqlx(flatten)]
    pub bill: BillRow,
    pub room_number: String,
    pub room_type: DbRoomType,
    pub created_by_username: String,
}

/// Data for inserting a bill
#[derive(Debug, Clone)]
pub struct NewBillRow {
    pub bill_number: String,
    pub room_id: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_days: u32,
    pub price_per_day: Decimal,
    pub total_amount: Decimal,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}
