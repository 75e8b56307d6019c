//! SQLite User Adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError, UserId};
use domain_identity::{NewUserRecord, Role, User, UserPort, UserRecord};

use crate::gateway::Gateway;
use crate::repositories::user::{DbRole, NewUserRow, UserRepository, UserRow};

/// SQLite-backed implementation of the UserPort trait
#[derive(Debug, Clone)]
pub struct SqliteUserAdapter {
    repository: UserRepository,
}

impl SqliteUserAdapter {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            repository: UserRepository::new(gateway),
        }
    }
}

impl DomainPort for SqliteUserAdapter {}

#[async_trait]
impl UserPort for SqliteUserAdapter {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, PortError> {
        Ok(self.repository.find_by_username(username).await?.map(row_to_record))
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, PortError> {
        Ok(self.repository.find_by_id(id.value()).await?.map(row_to_record))
    }

    #[instrument(skip(self))]
    async fn exists_with_role(&self, role: Role) -> Result<bool, PortError> {
        Ok(self.repository.exists_with_role(to_db_role(role)).await?)
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn insert(&self, user: NewUserRecord, now: DateTime<Utc>) -> Result<User, PortError> {
        debug!("Inserting user");
        let id = self
            .repository
            .insert(NewUserRow {
                username: user.username.clone(),
                password_hash: user.password_hash,
                role: to_db_role(user.role),
                created_at: now,
            })
            .await?;

        Ok(User {
            id: UserId::new(id),
            username: user.username,
            role: user.role,
            created_at: now,
        })
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, PortError> {
        Ok(self
            .repository
            .list()
            .await?
            .into_iter()
            .map(|row| row_to_record(row).to_user())
            .collect())
    }

    #[instrument(skip(self, password_hash), fields(user_id = %id))]
    async fn update_password(&self, id: UserId, password_hash: String) -> Result<bool, PortError> {
        Ok(self.repository.update_password(id.value(), password_hash).await?)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn delete(&self, id: UserId) -> Result<bool, PortError> {
        Ok(self.repository.delete(id.value()).await?)
    }
}

fn to_db_role(role: Role) -> DbRole {
    match role {
        Role::Admin => DbRole::Admin,
        Role::Cashier => DbRole::Cashier,
    }
}

fn row_to_record(row: UserRow) -> UserRecord {
    UserRecord {
        id: UserId::new(row.id),
        username: row.username,
        password_hash: row.password_hash,
        role: match row.role {
            DbRole::Admin => Role::Admin,
            DbRole::Cashier => Role::Cashier,
        },
        created_at: row.created_at,
    }
}
