use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::User;
use crate::db::types::UserRole;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "username must be between 1 and 50 chars"))]
    pub(crate) username: String,
    #[validate(length(min = 1, max = 100, message = "fullName must be between 1 and 100 chars"))]
    pub(crate) full_name: String,
    #[validate(
        email(message = "email must be valid"),
        length(max = 100, message = "email must be <= 100 chars")
    )]
    pub(crate) email: String,
    #[validate(length(min = 6, max = 100, message = "password must be between 6 and 100 chars"))]
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

/// Public projection of a user. The password hash never leaves the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub(crate) user_id: String,
    pub(crate) name: String,
    pub(crate) email: String,
}

impl UserResponse {
    pub(crate) fn from_db(user: User) -> Self {
        Self { user_id: user.id, name: user.full_name, email: user.email }
    }
}
