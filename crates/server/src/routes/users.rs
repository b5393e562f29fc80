//! `/api/users` handlers.
//!
//! Passwords are accepted on create and update and hashed before storage;
//! responses never include them.

use axum::{Json, extract::State, http::StatusCode};

use resto_core::UserId;

use super::missing;
use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::extract::{Payload, ResourceId};
use crate::models::{NewUser, User, UserChanges};
use crate::services::AuthService;
use crate::services::auth::hash_password;
use crate::state::AppState;

const ENTITY: &str = "User";

pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(UserRepository::new(state.pool()).list().await?))
}

pub async fn show(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<UserId>,
) -> Result<Json<User>> {
    UserRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(ENTITY.to_string()))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(new): Payload<NewUser>,
) -> Result<(StatusCode, Json<User>)> {
    let user = AuthService::new(state.pool(), state.config().auth_token_ttl)
        .create_user(&new)
        .await?;
    tracing::info!(user_id = %user.id, role = %user.role, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<UserId>,
    Payload(changes): Payload<UserChanges>,
) -> Result<Json<User>> {
    let password_hash = changes
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    UserRepository::new(state.pool())
        .update(id, &changes, password_hash.as_deref())
        .await
        .map(Json)
        .map_err(missing(ENTITY))
}

pub async fn destroy(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<UserId>,
) -> Result<StatusCode> {
    UserRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(missing(ENTITY))?;
    tracing::info!(user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
