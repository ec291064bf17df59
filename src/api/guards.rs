use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::{header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;

use crate::api::errors::ApiError;
use crate::api::policy::{self, AccessRule};
use crate::core::{security, state::AppState};
use crate::db::types::UserRole;
use crate::repositories;

/// Identity attached to the request once the gate has resolved the token.
#[derive(Debug, Clone)]
pub(crate) struct AuthContext {
    pub(crate) user_id: String,
    pub(crate) email: String,
    pub(crate) role: UserRole,
}

pub(crate) struct CurrentUser(pub(crate) AuthContext);

/// Route policy enforcement, run before every handler. Public rules skip
/// authentication entirely; everything else needs a valid bearer token for an
/// active user, then a role check against the matched rule.
pub(crate) async fn auth_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let rule = policy::decide(request.method(), request.uri().path());
    if rule == AccessRule::PermitAll {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(&request).ok_or(ApiError::Unauthorized("Unauthenticated"))?;

    let claims = security::verify_token(token, state.settings())
        .map_err(|_| ApiError::Unauthorized("Unauthenticated"))?;

    let user = repositories::users::find_by_email(state.db(), &claims.sub)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?
        .ok_or(ApiError::Unauthorized("Unauthenticated"))?;

    if !user.is_active {
        return Err(ApiError::Unauthorized("Unauthenticated"));
    }

    // The stored role wins when it drifted after the token was issued.
    if user.role != claims.role {
        tracing::debug!(user_id = %user.id, "Role changed since token issuance");
    }

    if !policy::rule_allows(rule, user.role) {
        return Err(ApiError::Forbidden("Access denied"));
    }

    request.extensions_mut().insert(AuthContext {
        user_id: user.id,
        email: user.email,
        role: user.role,
    });

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized("Unauthenticated"))
    }
}
