//! `/api/payment` handlers.

use axum::{Json, extract::State, http::StatusCode};

use resto_core::PaymentId;

use super::missing;
use crate::db::PaymentRepository;
use crate::error::{AppError, Result};
use crate::extract::{Payload, ResourceId};
use crate::models::{NewPayment, Payment, PaymentChanges};
use crate::state::AppState;

const ENTITY: &str = "Payment";

pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Payment>>> {
    Ok(Json(PaymentRepository::new(state.pool()).list().await?))
}

pub async fn show(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<PaymentId>,
) -> Result<Json<Payment>> {
    PaymentRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(ENTITY.to_string()))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(new): Payload<NewPayment>,
) -> Result<(StatusCode, Json<Payment>)> {
    let created = PaymentRepository::new(state.pool()).create(&new).await?;
    tracing::info!(payment_id = %created.id, "Payment created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<PaymentId>,
    Payload(changes): Payload<PaymentChanges>,
) -> Result<Json<Payment>> {
    PaymentRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map(Json)
        .map_err(missing(ENTITY))
}

/// Payments have no dependents, so delete never conflicts.
pub async fn destroy(
    State(state): State<AppState>,
    ResourceId(id): ResourceId<PaymentId>,
) -> Result<StatusCode> {
    PaymentRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(missing(ENTITY))?;
    tracing::info!(payment_id = %id, "Payment deleted");
    Ok(StatusCode::NO_CONTENT)
}
