use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::auth::TokenResponse;
use crate::schemas::user::{LoginRequest, RegisterRequest, UserResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let email = payload.email.trim().to_lowercase();

    let username_taken = repositories::users::exists_by_username(state.db(), &payload.username)
        .await
        .map_err(|e| wrap_failure(e, "Failed to check existing username"))?;
    if username_taken.is_some() {
        return Err(ApiError::BadRequest("Username already exists".to_string()));
    }

    let email_taken = repositories::users::exists_by_email(state.db(), &email)
        .await
        .map_err(|e| wrap_failure(e, "Failed to check existing email"))?;
    if email_taken.is_some() {
        return Err(ApiError::BadRequest("Email already exists".to_string()));
    }

    let hashed_password = security::hash_password(&payload.password)
        .map_err(|e| wrap_failure(e, "Failed to hash password"))?;

    let now = primitive_now_utc();
    let user = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            username: &payload.username,
            email: &email,
            hashed_password,
            full_name: &payload.full_name,
            role: payload.role.unwrap_or(UserRole::Student),
            is_active: true,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| wrap_failure(e, "Failed to register user"))?;

    Ok(Json(UserResponse::from_db(user)))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();

    let user = repositories::users::find_by_email(state.db(), &email)
        .await
        .map_err(|e| wrap_failure(e, "Failed to load user"))?
        .ok_or_else(invalid_credentials)?;

    let verified = security::verify_password(&payload.password, &user.hashed_password)
        .map_err(|_| invalid_credentials())?;
    if !verified {
        return Err(invalid_credentials());
    }

    if !user.is_active {
        return Err(invalid_credentials());
    }

    let token = security::create_access_token(&user.email, user.role, state.settings(), None)
        .map_err(|e| wrap_failure(e, "Failed to create access token"))?;

    Ok(Json(TokenResponse::bearer(token)))
}

async fn me(
    CurrentUser(context): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = repositories::users::find_by_id(state.db(), &context.user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from_db(user)))
}

fn invalid_credentials() -> ApiError {
    ApiError::BadRequest("Invalid email or password".to_string())
}

/// The auth endpoints answer 400 for every failure, so internal errors are
/// logged here and folded into the 400 envelope.
fn wrap_failure(err: impl std::fmt::Display, context: &str) -> ApiError {
    tracing::error!(error = %err, "{context}");
    ApiError::BadRequest(context.to_string())
}

#[cfg(test)]
mod tests;
