//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /test                   - Liveness message
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness (database reachable)
//!
//! # Auth
//! POST /api/auth/register      - Create a customer account
//! POST /api/auth/login         - Issue a bearer token
//! POST /api/auth/logout        - Revoke the presented token (bearer)
//! GET  /api/auth/me            - Current user (bearer)
//!
//! # Resources (same five routes each)
//! GET    /api/{resource}       - List, ordered by id
//! POST   /api/{resource}       - Create
//! GET    /api/{resource}/{id}  - Fetch one
//! PUT    /api/{resource}/{id}  - Partial update
//! DELETE /api/{resource}/{id}  - Delete
//!
//! resource = users | menu | orders | kategori | payment
//!
//! # API keys
//! GET    /api/apikeys          - Own keys (bearer)
//! POST   /api/apikeys          - Issue a key (bearer)
//! DELETE /api/apikeys/{id}     - Revoke own key (bearer)
//! POST   /api/apikeys/verify   - Check a key
//! ```

pub mod apikey;
pub mod auth;
pub mod health;
pub mod kategori;
pub mod menu;
pub mod orders;
pub mod payment;
pub mod users;

use axum::{
    Json, Router,
    routing::{MethodRouter, get, post},
};
use serde_json::{Value, json};

use crate::db::RepositoryError;
use crate::error::AppError;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the API key routes router.
pub fn apikey_routes() -> Router<AppState> {
    Router::new()
        .route("/apikeys", get(apikey::index).post(apikey::create))
        .route("/apikeys/verify", post(apikey::verify))
        .route("/apikeys/{id}", axum::routing::delete(apikey::revoke))
}

/// Build the five CRUD routes for one resource.
fn resource(
    collection: MethodRouter<AppState>,
    member: MethodRouter<AppState>,
) -> Router<AppState> {
    Router::new()
        .route("/", collection)
        .route("/{id}", member)
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/test", get(test))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .nest("/api/auth", auth_routes())
        .nest(
            "/api/users",
            resource(
                get(users::index).post(users::create),
                get(users::show).put(users::update).delete(users::destroy),
            ),
        )
        .nest(
            "/api/menu",
            resource(
                get(menu::index).post(menu::create),
                get(menu::show).put(menu::update).delete(menu::destroy),
            ),
        )
        .nest(
            "/api/orders",
            resource(
                get(orders::index).post(orders::create),
                get(orders::show).put(orders::update).delete(orders::destroy),
            ),
        )
        .nest(
            "/api/kategori",
            resource(
                get(kategori::index).post(kategori::create),
                get(kategori::show)
                    .put(kategori::update)
                    .delete(kategori::destroy),
            ),
        )
        .nest(
            "/api/payment",
            resource(
                get(payment::index).post(payment::create),
                get(payment::show)
                    .put(payment::update)
                    .delete(payment::destroy),
            ),
        )
        .nest("/api", apikey_routes())
}

/// `GET /test`
async fn test() -> Json<Value> {
    Json(json!({ "message": "Server is running!" }))
}

/// Report a missing row as a 404 naming the entity.
fn missing(entity: &'static str) -> impl FnOnce(RepositoryError) -> AppError {
    move |err| match err {
        RepositoryError::NotFound => AppError::NotFound(entity.to_string()),
        other => AppError::Database(other),
    }
}
