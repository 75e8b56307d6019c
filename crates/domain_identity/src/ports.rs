//! Identity Ports

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{DomainPort, PortError, UserId};

use crate::user::{NewUserRecord, Role, User, UserRecord};

/// Credential store
///
/// Adapters report a username clash as `PortError::Duplicate` and a delete
/// blocked by bills referencing the user as `PortError::Conflict`.
#[async_trait]
pub trait UserPort: DomainPort {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, PortError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, PortError>;

    /// Whether at least one account holds `role`
    async fn exists_with_role(&self, role: Role) -> Result<bool, PortError>;

    async fn insert(&self, user: NewUserRecord, now: DateTime<Utc>) -> Result<User, PortError>;

    /// All accounts ordered by username
    async fn list(&self) -> Result<Vec<User>, PortError>;

    /// Returns `false` if no such user
    async fn update_password(&self, id: UserId, password_hash: String) -> Result<bool, PortError>;

    /// Returns `false` if no such user
    async fn delete(&self, id: UserId) -> Result<bool, PortError>;
}
