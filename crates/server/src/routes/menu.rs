//! `/api/menu` handlers.

use axum::{Json, extract::State, http::StatusCode};

use resto_core::MenuItemId;

use super::missing;
use crate::db::MenuItemRepository;
use crate::error::{AppError, Result};
use crate::extract::{Payload, ResourceId};
use crate::models::{MenuItem, MenuItemChanges, NewMenuItem};
use crate::state::AppState;

const ENTITY: &str = "Menu item";

pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>> {
    Ok(Json(MenuItemRepository::new(state.pool()).list().await?))
}

pub async fn show(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<MenuItemId>,
) -> Result<Json<MenuItem>> {
    MenuItemRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(ENTITY.to_string()))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(new): Payload<NewMenuItem>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    let item = MenuItemRepository::new(state.pool()).create(&new).await?;
    tracing::info!(menu_item_id = %item.id, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<MenuItemId>,
    Payload(changes): Payload<MenuItemChanges>,
) -> Result<Json<MenuItem>> {
    MenuItemRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map(Json)
        .map_err(missing(ENTITY))
}

pub async fn destroy(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<MenuItemId>,
) -> Result<StatusCode> {
    MenuItemRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(missing(ENTITY))?;
    tracing::info!(menu_item_id = %id, "Menu item deleted");
    Ok(StatusCode::NO_CONTENT)
}
