//! `/api/orders` handlers.
//!
//! `status` is free-form within [`resto_core::OrderStatus`]; any transition is accepted.

use axum::{Json, extract::State, http::StatusCode};

use resto_core::OrderId;

use super::missing;
use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::extract::{Payload, ResourceId};
use crate::models::{NewOrder, Order, OrderChanges};
use crate::state::AppState;

const ENTITY: &str = "Order";

pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    Ok(Json(OrderRepository::new(state.pool()).list().await?))
}

pub async fn show(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<OrderId>,
) -> Result<Json<Order>> {
    OrderRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(ENTITY.to_string()))
}

/// A dangling `menu_item_id` or `user_id` is a 400.
pub async fn create(
    State(state): State<AppState>,
    Payload(new): Payload<NewOrder>,
) -> Result<(StatusCode, Json<Order>)> {
    let created = OrderRepository::new(state.pool()).create(&new).await?;
    tracing::info!(order_id = %created.id, "Order created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<OrderId>,
    Payload(changes): Payload<OrderChanges>,
) -> Result<Json<Order>> {
    OrderRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map(Json)
        .map_err(missing(ENTITY))
}

pub async fn destroy(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<OrderId>,
) -> Result<StatusCode> {
    OrderRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(missing(ENTITY))?;
    tracing::info!(order_id = %id, "Order deleted");
    Ok(StatusCode::NO_CONTENT)
}
