//! Session tokens
//!
//! A successful login yields an HS256 token carrying the user's id, name and
//! role. The middleware turns a valid token back into a `Session` that is
//! handed explicitly to every handler needing the caller.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::UserId;
use domain_identity::{Identity, Role, Session};

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: i64,
    pub username: String,
    pub role: Role,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            id: UserId::new(self.sub),
            username: self.username.clone(),
            role: self.role,
        }
    }

    pub fn into_session(self) -> Session {
        Session::new(self.identity())
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token could not be issued: {0}")]
    Encoding(String),
}

/// Issues a token for a logged-in identity
pub fn create_token(identity: &Identity, secret: &str, ttl_secs: u64) -> Result<String, AuthError> {
    let now = Utc::now();
    let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX / 1000);
    let exp = now + Duration::seconds(ttl);

    let claims = Claims {
        sub: identity.id.value(),
        username: identity.username.clone(),
        role: identity.role,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Encoding(e.to_string()))
}

/// Validates a token and returns its claims
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cashier() -> Identity {
        Identity {
            id: UserId::new(7),
            username: "cashier1".to_string(),
            role: Role::Cashier,
        }
    }

    #[test]
    fn test_token_round_trip_keeps_identity() {
        let token = create_token(&cashier(), "secret", 3600).unwrap();
        let claims = validate_token(&token, "secret").unwrap();
        assert_eq!(claims.identity(), cashier());

        let session = claims.into_session();
        assert_eq!(session.user_id(), UserId::new(7));
        assert!(!session.is_admin());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(&cashier(), "secret", 3600).unwrap();
        assert!(matches!(validate_token(&token, "other"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 7,
            username: "cashier1".to_string(),
            role: Role::Cashier,
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap();
        assert!(matches!(validate_token(&token, "secret"), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(validate_token("not-a-token", "secret").is_err());
    }
}
