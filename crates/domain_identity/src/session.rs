//! Authenticated caller context
//!
//! A `Session` is built from a verified token on every request and passed
//! explicitly to operations that need to know who is calling.

use serde::{Deserialize, Serialize};

use core_kernel::UserId;

use crate::error::IdentityError;
use crate::user::{Role, User};

/// Public projection of a user returned by login; never carries the hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// The caller of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    identity: Identity,
}

impl Session {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn user_id(&self) -> UserId {
        self.identity.id
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    pub fn is_admin(&self) -> bool {
        self.identity.role == Role::Admin
    }

    /// Fails with `Forbidden` unless the caller is an administrator
    pub fn require_admin(&self) -> Result<(), IdentityError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(IdentityError::Forbidden(format!(
                "'{}' is not an administrator",
                self.identity.username
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session::new(Identity {
            id: UserId::new(2),
            username: "frontdesk".to_string(),
            role,
        })
    }

    #[test]
    fn test_require_admin() {
        assert!(session(Role::Admin).require_admin().is_ok());
        assert!(matches!(
            session(Role::Cashier).require_admin(),
            Err(IdentityError::Forbidden(_))
        ));
    }
}
