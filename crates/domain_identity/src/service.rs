//! Identity service: login, default admin and account management

use std::sync::Arc;

use tracing::{info, warn};

use core_kernel::{Clock, PortError, UserId};

use crate::error::IdentityError;
use crate::password::{hash_password, validate_password, verify_password};
use crate::ports::UserPort;
use crate::session::{Identity, Session};
use crate::user::{normalize_username, NewUser, NewUserRecord, Role, User};

/// Credentials for the administrator created on first start
#[derive(Clone)]
pub struct IdentityConfig {
    pub default_admin_username: String,
    pub default_admin_password: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            default_admin_username: "admin".to_string(),
            default_admin_password: "admin123".to_string(),
        }
    }
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("default_admin_username", &self.default_admin_username)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserPort>,
    clock: Arc<dyn Clock>,
    config: IdentityConfig,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserPort>, clock: Arc<dyn Clock>, config: IdentityConfig) -> Self {
        Self { users, clock, config }
    }

    /// Creates the configured administrator unless an admin already exists
    ///
    /// Returns `true` when an account was created. Safe to call on every
    /// start.
    pub async fn provision_default_admin(&self) -> Result<bool, IdentityError> {
        if self.users.exists_with_role(Role::Admin).await? {
            return Ok(false);
        }

        let admin = self
            .create_user(NewUser::new(
                self.config.default_admin_username.clone(),
                self.config.default_admin_password.clone(),
                Role::Admin,
            ))
            .await?;

        info!(user_id = %admin.id, username = %admin.username, "Default administrator provisioned");
        Ok(true)
    }

    /// Verifies a username and password
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, IdentityError> {
        let username = username.trim();
        let record = match self.users.find_by_username(username).await? {
            Some(record) => record,
            None => {
                warn!(%username, "Login for unknown user");
                return Err(IdentityError::UserNotFound(username.to_string()));
            }
        };

        if !verify_password(password, &record.password_hash)? {
            warn!(%username, "Login with wrong password");
            return Err(IdentityError::InvalidCredentials);
        }

        info!(user_id = %record.id, %username, role = %record.role, "User logged in");
        Ok(Identity::from(&record.to_user()))
    }

    /// Stores a new account with a hashed password
    pub async fn create_user(&self, user: NewUser) -> Result<User, IdentityError> {
        let username = normalize_username(&user.username)?;
        validate_password(&user.password)?;
        let password_hash = hash_password(&user.password)?;

        let record = NewUserRecord {
            username: username.clone(),
            password_hash,
            role: user.role,
        };

        let created = self
            .users
            .insert(record, self.clock.now())
            .await
            .map_err(|e| match e {
                PortError::Duplicate { .. } => IdentityError::DuplicateUsername(username.clone()),
                other => IdentityError::Storage(other),
            })?;

        info!(user_id = %created.id, username = %created.username, role = %created.role, "User created");
        Ok(created)
    }

    /// All accounts ordered by username
    pub async fn list_users(&self) -> Result<Vec<User>, IdentityError> {
        Ok(self.users.list().await?)
    }

    /// The current account behind a session
    pub async fn current_user(&self, session: &Session) -> Result<User, IdentityError> {
        self.users
            .find_by_id(session.user_id())
            .await?
            .map(|record| record.to_user())
            .ok_or(IdentityError::UserIdNotFound(session.user_id()))
    }

    /// Replaces the caller's password after re-checking the current one
    pub async fn change_password(
        &self,
        session: &Session,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let id = session.user_id();
        let record = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::UserIdNotFound(id))?;

        if !verify_password(current_password, &record.password_hash)? {
            warn!(user_id = %id, "Password change with wrong current password");
            return Err(IdentityError::InvalidCredentials);
        }
        validate_password(new_password)?;

        let hash = hash_password(new_password)?;
        if !self.users.update_password(id, hash).await? {
            return Err(IdentityError::UserIdNotFound(id));
        }

        info!(user_id = %id, "Password changed");
        Ok(())
    }

    /// Deletes a cashier account that has not issued any bills
    pub async fn remove_cashier(&self, id: UserId) -> Result<(), IdentityError> {
        let record = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::UserIdNotFound(id))?;

        if record.role == Role::Admin {
            return Err(IdentityError::Forbidden(
                "Administrator accounts cannot be removed".to_string(),
            ));
        }

        let removed = self.users.delete(id).await.map_err(|e| match e {
            PortError::Conflict { .. } => IdentityError::Conflict(format!(
                "'{}' has issued bills and cannot be removed",
                record.username
            )),
            other => IdentityError::Storage(other),
        })?;
        if !removed {
            return Err(IdentityError::UserIdNotFound(id));
        }

        info!(user_id = %id, username = %record.username, "Cashier removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate, Utc};
    use core_kernel::{Classify, DomainPort, ErrorKind, FixedClock};
    use std::sync::Mutex;

    use crate::user::UserRecord;

    #[derive(Default)]
    struct VecUsers {
        users: Mutex<Vec<UserRecord>>,
        with_bills: Mutex<Vec<UserId>>,
    }

    impl DomainPort for VecUsers {}

    #[async_trait]
    impl UserPort for VecUsers {
        async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, PortError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.username == username).cloned())
        }

        async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, PortError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn exists_with_role(&self, role: Role) -> Result<bool, PortError> {
            Ok(self.users.lock().unwrap().iter().any(|u| u.role == role))
        }

        async fn insert(&self, user: NewUserRecord, now: DateTime<Utc>) -> Result<User, PortError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username == user.username) {
                return Err(PortError::duplicate("users.username"));
            }
            let record = UserRecord {
                id: UserId::new(users.len() as i64 + 1),
                username: user.username,
                password_hash: user.password_hash,
                role: user.role,
                created_at: now,
            };
            users.push(record.clone());
            Ok(record.to_user())
        }

        async fn list(&self) -> Result<Vec<User>, PortError> {
            Ok(self.users.lock().unwrap().iter().map(UserRecord::to_user).collect())
        }

        async fn update_password(&self, id: UserId, password_hash: String) -> Result<bool, PortError> {
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|u| u.id == id) {
                Some(user) => {
                    user.password_hash = password_hash;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, id: UserId) -> Result<bool, PortError> {
            if self.with_bills.lock().unwrap().contains(&id) {
                return Err(PortError::conflict("bills.created_by"));
            }
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != id);
            Ok(users.len() != before)
        }
    }

    fn service() -> (IdentityService, Arc<VecUsers>) {
        let port = Arc::new(VecUsers::default());
        let clock = Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
        (IdentityService::new(port.clone(), clock, IdentityConfig::default()), port)
    }

    #[tokio::test]
    async fn test_provision_is_idempotent() {
        let (service, port) = service();
        assert!(service.provision_default_admin().await.unwrap());
        assert!(!service.provision_default_admin().await.unwrap());
        assert_eq!(port.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stored_password_is_hashed() {
        let (service, port) = service();
        service.provision_default_admin().await.unwrap();
        let stored = port.users.lock().unwrap()[0].password_hash.clone();
        assert_ne!(stored, "admin123");
        assert!(stored.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let (service, _) = service();
        service.provision_default_admin().await.unwrap();

        let identity = service.login("admin", "admin123").await.unwrap();
        assert_eq!(identity.role, Role::Admin);

        let wrong = service.login("admin", "nope-nope").await.unwrap_err();
        assert_eq!(wrong.kind(), ErrorKind::InvalidCredentials);

        let unknown = service.login("ghost", "admin123").await.unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let (service, _) = service();
        service.create_user(NewUser::new("cashier1", "secret1", Role::Cashier)).await.unwrap();
        let err = service
            .create_user(NewUser::new(" cashier1 ", "secret2", Role::Cashier))
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::DuplicateUsername(ref u) if u == "cashier1"));
    }

    #[tokio::test]
    async fn test_change_password_requires_current() {
        let (service, _) = service();
        let user = service.create_user(NewUser::new("cashier1", "secret1", Role::Cashier)).await.unwrap();
        let session = Session::new(Identity::from(&user));

        let err = service.change_password(&session, "wrong1", "secret2").await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidCredentials));

        service.change_password(&session, "secret1", "secret2").await.unwrap();
        assert!(service.login("cashier1", "secret2").await.is_ok());
        assert!(service.login("cashier1", "secret1").await.is_err());
    }

    #[tokio::test]
    async fn test_remove_cashier_rules() {
        let (service, port) = service();
        service.provision_default_admin().await.unwrap();
        let admin = service.login("admin", "admin123").await.unwrap();
        let busy = service.create_user(NewUser::new("busy", "secret1", Role::Cashier)).await.unwrap();
        let idle = service.create_user(NewUser::new("idle", "secret1", Role::Cashier)).await.unwrap();
        port.with_bills.lock().unwrap().push(busy.id);

        assert_eq!(service.remove_cashier(admin.id).await.unwrap_err().kind(), ErrorKind::Forbidden);
        assert_eq!(service.remove_cashier(busy.id).await.unwrap_err().kind(), ErrorKind::Conflict);
        service.remove_cashier(idle.id).await.unwrap();
        assert_eq!(service.remove_cashier(idle.id).await.unwrap_err().kind(), ErrorKind::NotFound);
    }
}
