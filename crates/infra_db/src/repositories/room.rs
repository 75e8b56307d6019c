//! Room repository implementation

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::DatabaseError;
use crate::gateway::{FlagRow, Gateway};

const ROOM_COLUMNS: &str = "id, room_number, room_type, price_per_night, description, is_active, created_at, updated_at";

/// Repository for the `rooms` table
#[derive(Debug, Clone)]
pub struct RoomRepository {
    gateway: Gateway,
}

impl RoomRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Active rooms ordered by room number
    pub async fn list_active(&self) -> Result<Vec<RoomRow>, DatabaseError> {
        let sql = format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE is_active = 1 ORDER BY room_number ASC, id ASC"
        );
        self.gateway.query_many(&sql, &[]).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<RoomRow, DatabaseError> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?1");
        self.gateway
            .query_one(&sql, &[id.into()])
            .await?
            .ok_or_else(|| DatabaseError::not_found("Room", id))
    }

    pub async fn find_active_by_number(&self, room_number: &str) -> Result<Option<RoomRow>, DatabaseError> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE room_number = ?1 AND is_active = 1");
        self.gateway.query_one(&sql, &[room_number.into()]).await
    }

    /// Inserts an active room and returns its id
    pub async fn insert(&self, room: NewRoomRow) -> Result<i64, DatabaseError> {
        let result = self
            .gateway
            .execute(
                r#"
                INSERT INTO rooms (
                    room_number, room_type, price_per_night, description,
                    is_active, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5)
                "#,
                &[
                    room.room_number.into(),
                    room.room_type.as_str().into(),
                    room.price_per_night.into(),
                    room.description.into(),
                    room.now.into(),
                ],
            )
            .await?;
        Ok(result.inserted_id)
    }

    /// Partial update; absent fields keep their value, an empty description
    /// clears it
    pub async fn update(&self, id: i64, changes: RoomChanges) -> Result<(), DatabaseError> {
        let result = self
            .gateway
            .execute(
                r#"
                UPDATE rooms SET
                    room_number     = COALESCE(?2, room_number),
                    room_type       = COALESCE(?3, room_type),
                    price_per_night = COALESCE(?4, price_per_night),
                    description     = CASE WHEN ?5 IS NULL THEN description ELSE NULLIF(?5, '') END,
                    updated_at      = ?6
                WHERE id = ?1
                "#,
                &[
                    id.into(),
                    changes.room_number.into(),
                    changes.room_type.map(|t| t.as_str()).into(),
                    changes.price_per_night.into(),
                    changes.description.into(),
                    changes.now.into(),
                ],
            )
            .await?;

        if result.rows_affected == 0 {
            return Err(DatabaseError::not_found("Room", id));
        }
        Ok(())
    }

    /// Clears the active flag; returns whether the row changed
    pub async fn deactivate(&self, id: i64, now: DateTime<Utc>) -> Result<bool, DatabaseError> {
        let result = self
            .gateway
            .execute(
                "UPDATE rooms SET is_active = 0, updated_at = ?2 WHERE id = ?1 AND is_active = 1",
                &[id.into(), now.into()],
            )
            .await?;

        if result.rows_affected == 0 {
            // Either already inactive or missing
            self.get_by_id(id).await?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Whether a bill for the room occupies any night of `[check_in, check_out)`
    ///
    /// Stored same-day bills occupy their check-in night.
    pub async fn has_overlapping_bill(
        &self,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool, DatabaseError> {
        let row: Option<FlagRow> = self
            .gateway
            .query_one(OVERLAP_SQL, &[room_id.into(), check_in.into(), check_out.into()])
            .await?;
        Ok(row.map(|r| r.flag).unwrap_or(false))
    }
}

/// Shared with the bill adapter, which runs it inside the insert transaction
pub(crate) const OVERLAP_SQL: &str = r#"
    SELECT EXISTS (
        SELECT 1 FROM bills
        WHERE room_id = ?1
          AND check_in_date < ?3
          AND ?2 < MAX(check_out_date, date(check_in_date, '+1 day'))
    ) AS flag
"#;

/// Room type as stored in the `room_type` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum DbRoomType {
    Ac,
    NonAc,
}

impl DbRoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbRoomType::Ac => "ac",
            DbRoomType::NonAc => "non_ac",
        }
    }
}

/// Row of the `rooms` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoomRow {
    pub id: i64,
    pub room_number: String,
    pub room_type: DbRoomType,
    pub price_per_night: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a room
#[derive(Debug, Clone)]
pub struct NewRoomRow {
    pub room_number: String,
    pub room_type: DbRoomType,
    pub price_per_night: Decimal,
    pub description: Option<String>,
    pub now: DateTime<Utc>,
}

/// Columns to change; `None` keeps the stored value
#[derive(Debug, Clone)]
pub struct RoomChanges {
    pub room_number: Option<String>,
    pub room_type: Option<DbRoomType>,
    pub price_per_night: Option<Decimal>,
    pub description: Option<String>,
    pub now: DateTime<Utc>,
}
