//! API key handlers, mounted under `/api`.

use axum::{Json, extract::State, http::StatusCode};

use resto_core::ApiKeyId;

use super::missing;
use crate::error::Result;
use crate::extract::{Payload, ResourceId};
use crate::middleware::RequireAuth;
use crate::models::{ApiKey, IssuedApiKey, NewApiKey, VerifyApiKey};
use crate::services::ApiKeyService;
use crate::services::api_keys::KeyVerification;
use crate::state::AppState;

/// The caller's own keys. Revoked keys are not listed.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<ApiKey>>> {
    Ok(Json(ApiKeyService::new(state.pool()).list(user.id).await?))
}

/// Issue a key. The plaintext `key` appears in this response only.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Payload(request): Payload<NewApiKey>,
) -> Result<(StatusCode, Json<IssuedApiKey>)> {
    let issued = ApiKeyService::new(state.pool())
        .issue(user.id, &request)
        .await?;
    Ok((StatusCode::CREATED, Json(issued)))
}

pub async fn revoke(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ResourceId(id): ResourceId<ApiKeyId>,
) -> Result<StatusCode> {
    ApiKeyService::new(state.pool())
        .revoke(user.id, id)
        .await
        .map_err(missing("API key"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check a key. Unknown and revoked keys answer `{"valid": false}`, not an error.
pub async fn verify(
    State(state): State<AppState>,
    Payload(request): Payload<VerifyApiKey>,
) -> Result<Json<KeyVerification>> {
    Ok(Json(
        ApiKeyService::new(state.pool()).verify(&request.key).await?,
    ))
}
