//! Gateway and schema checks on a temporary SQLite file

use infra_db::{ensure_schema, Gateway, SqlValue};
use sqlx::FromRow;

use test_utils::TestDatabase;

#[derive(Debug, FromRow)]
struct CountRow {
    count: i64,
}

#[tokio::test]
async fn test_schema_is_idempotent() {
    let db = TestDatabase::new().await.unwrap();
    ensure_schema(db.pool()).await.unwrap();
    ensure_schema(db.pool()).await.unwrap();
}

#[tokio::test]
async fn test_execute_and_query_with_params() {
    let db = TestDatabase::new().await.unwrap();
    let gateway = Gateway::new(db.pool().clone());

    let result = gateway
        .execute(
            "INSERT INTO bill_sequences (day, last_seq) VALUES (?1, ?2)",
            &[SqlValue::from("20240115"), SqlValue::from(4i64)],
        )
        .await
        .unwrap();
    assert_eq!(result.rows_affected, 1);

    let row: Option<CountRow> = gateway
        .query_one(
            "SELECT last_seq AS count FROM bill_sequences WHERE day = ?1",
            &[SqlValue::from("20240115")],
        )
        .await
        .unwrap();
    assert_eq!(row.map(|r| r.count), Some(4));

    let missing: Option<CountRow> = gateway
        .query_one(
            "SELECT last_seq AS count FROM bill_sequences WHERE day = ?1",
            &[SqlValue::from("20240116")],
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_unique_violation_is_classified() {
    let db = TestDatabase::new().await.unwrap();
    let gateway = Gateway::new(db.pool().clone());
    let insert = "INSERT INTO bill_sequences (day, last_seq) VALUES ('20240115', 1)";

    gateway.execute(insert, &[]).await.unwrap();
    let err = gateway.execute(insert, &[]).await.unwrap_err();
    assert!(err.is_constraint_violation(), "{:?}", err);
}

#[tokio::test]
async fn test_foreign_keys_enforced() {
    let db = TestDatabase::new().await.unwrap();
    let gateway = Gateway::new(db.pool().clone());

    let err = gateway
        .execute(
            "INSERT INTO bills (bill_number, room_id, customer_name, check_in_date, check_out_date, \
             total_days, price_per_day, total_amount, created_by, created_at) \
             VALUES ('VB20240115001', 99, 'Guest', '2024-01-15', '2024-01-16', 1, '1', '1', 99, '2024-01-15T00:00:00Z')",
            &[],
        )
        .await
        .unwrap_err();
    assert!(err.is_constraint_violation(), "{:?}", err);
}

#[tokio::test]
async fn test_ping() {
    let db = TestDatabase::new().await.unwrap();
    Gateway::new(db.pool().clone()).ping().await.unwrap();
}
