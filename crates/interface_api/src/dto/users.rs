//! User management DTOs

use serde::Deserialize;
use validator::Validate;

use domain_identity::{NewUser, Role};

#[derive(Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,

    pub role: Role,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        NewUser::new(request.username, request.password, request.role)
    }
}
