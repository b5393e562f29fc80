//! `/api/auth` handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::db::UserRepository;
use crate::error::{AppError, Result, clear_sentry_user};
use crate::extract::Payload;
use crate::middleware::RequireAuth;
use crate::models::{NewUser, User};
use crate::services::{AuthService, Credentials, LoginSession};
use crate::state::AppState;

/// Self-registration. The account is always a customer.
pub async fn register(
    State(state): State<AppState>,
    Payload(new): Payload<NewUser>,
) -> Result<(StatusCode, Json<User>)> {
    let user = AuthService::new(state.pool(), state.config().auth_token_ttl)
        .register(new)
        .await?;
    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange email and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Payload(credentials): Payload<Credentials>,
) -> Result<Json<LoginSession>> {
    let session = AuthService::new(state.pool(), state.config().auth_token_ttl)
        .login(&credentials)
        .await?;
    Ok(Json(session))
}

/// Revoke the token used for this request.
pub async fn logout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<StatusCode> {
    AuthService::new(state.pool(), state.config().auth_token_ttl)
        .logout(user.token_id)
        .await?;
    clear_sentry_user();
    tracing::info!(user_id = %user.id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<User>> {
    UserRepository::new(state.pool())
        .get(user.id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User".to_string()))
}
