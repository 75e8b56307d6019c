//! User repository implementation

use chrono::{DateTime, Utc};

use crate::error::DatabaseError;
use crate::gateway::{FlagRow, Gateway};

const USER_COLUMNS: &str = "id, username, password_hash, role, created_at";

/// Repository for the `users` table
#[derive(Debug, Clone)]
pub struct UserRepository {
    gateway: Gateway,
}

impl UserRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserRow>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
        self.gateway.query_one(&sql, &[username.into()]).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserRow>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
        self.gateway.query_one(&sql, &[id.into()]).await
    }

    pub async fn exists_with_role(&self, role: DbRole) -> Result<bool, DatabaseError> {
        let row: Option<FlagRow> = self
            .gateway
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM users WHERE role = ?1) AS flag",
                &[role.as_str().into()],
            )
            .await?;
        Ok(row.map(|r| r.flag).unwrap_or(false))
    }

    /// Inserts a user and returns its id
    pub async fn insert(&self, user: NewUserRow) -> Result<i64, DatabaseError> {
        let result = self
            .gateway
            .execute(
                "INSERT INTO users (username, password_hash, role, created_at) VALUES (?1, ?2, ?3, ?4)",
                &[
                    user.username.into(),
                    user.password_hash.into(),
                    user.role.as_str().into(),
                    user.created_at.into(),
                ],
            )
            .await?;
        Ok(result.inserted_id)
    }

    pub async fn list(&self) -> Result<Vec<UserRow>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY username ASC");
        self.gateway.query_many(&sql, &[]).await
    }

    pub async fn update_password(&self, id: i64, password_hash: String) -> Result<bool, DatabaseError> {
        let result = self
            .gateway
            .execute(
                "UPDATE users SET password_hash = ?2 WHERE id = ?1",
                &[id.into(), password_hash.into()],
            )
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Deletes a user; fails with a foreign-key violation while bills
    /// reference it
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = self
            .gateway
            .execute("DELETE FROM users WHERE id = ?1", &[id.into()])
            .await?;
        Ok(result.rows_affected > 0)
    }
}

/// Role as stored in the `role` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum DbRole {
    Admin,
    Cashier,
}

impl DbRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbRole::Admin => "admin",
            DbRole::Cashier => "cashier",
        }
    }
}

/// Row of the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: DbRole,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a user
#[derive(Debug, Clone)]
pub struct NewUserRow {
    pub username: String,
    pub password_hash: String,
    pub role: DbRole,
    pub created_at: DateTime<Utc>,
}
