//! `/api/kategori` handlers (menu categories).
//!
//! Deleting a category keeps its menu items; they become uncategorised.

use axum::{Json, extract::State, http::StatusCode};

use resto_core::CategoryId;

use super::missing;
use crate::db::CategoryRepository;
use crate::error::{AppError, Result};
use crate::extract::{Payload, ResourceId};
use crate::models::{Category, CategoryChanges, NewCategory};
use crate::state::AppState;

const ENTITY: &str = "Category";

pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(CategoryRepository::new(state.pool()).list().await?))
}

pub async fn show(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<CategoryId>,
) -> Result<Json<Category>> {
    CategoryRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(ENTITY.to_string()))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(new): Payload<NewCategory>,
) -> Result<(StatusCode, Json<Category>)> {
    let created = CategoryRepository::new(state.pool()).create(&new).await?;
    tracing::info!(category_id = %created.id, "Category created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<CategoryId>,
    Payload(changes): Payload<CategoryChanges>,
) -> Result<Json<Category>> {
    CategoryRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map(Json)
        .map_err(missing(ENTITY))
}

pub async fn destroy(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<CategoryId>,
) -> Result<StatusCode> {
    CategoryRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(missing(ENTITY))?;
    tracing::info!(category_id = %id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
