//! Auth DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_identity::Identity;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds
    pub expires_in: u64,
    pub user: Identity,
}

#[derive(Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 6, max = 128, message = "New password must be 6-128 characters"))]
    pub new_password: String,
}
