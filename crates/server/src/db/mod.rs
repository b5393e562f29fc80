//! Database access for the restaurant `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Staff and customer accounts (argon2 password hashes)
//! - `auth_tokens` - Hashed bearer tokens issued at login
//! - `categories` - Menu categories (`/api/kategori`)
//! - `menu_items` - Menu entries, optionally in a category
//! - `orders` - One menu item per order line
//! - `payments` - Payments recorded against orders
//! - `api_keys` - Hashed API keys owned by users
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/`, are embedded at compile time
//! and applied by [`sync`] on every startup, or manually with:
//! ```bash
//! cargo run -p resto-cli -- migrate
//! ```

pub mod api_keys;
pub mod auth_tokens;
pub mod categories;
pub mod menu_items;
pub mod orders;
pub mod payments;
pub mod users;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use api_keys::ApiKeyRepository;
pub use auth_tokens::AuthTokenRepository;
pub use categories::CategoryRepository;
pub use menu_items::MenuItemRepository;
pub use orders::OrderRepository;
pub use payments::PaymentRepository;
pub use users::UserRepository;

use crate::config::DatabaseConfig;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violation, or a delete blocked by dependent rows.
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A foreign key points at a row that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A check constraint rejected the row.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl RepositoryError {
    /// Classify an error from an `INSERT` or `UPDATE`.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_owned();
            if db_err.is_unique_violation() {
                return Self::Conflict(format!("duplicate value violates {constraint}"));
            }
            if db_err.is_foreign_key_violation() {
                return Self::InvalidReference(format!("referenced row does not exist ({constraint})"));
            }
            if db_err.is_check_violation() {
                return Self::InvalidValue(format!("value rejected by {constraint}"));
            }
        }
        Self::Database(err)
    }

    /// Classify an error from a `DELETE`. A foreign key violation here means
    /// other rows still point at the one being deleted.
    pub(crate) fn from_delete(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_foreign_key_violation()
        {
            return Self::Conflict("row is still referenced by other records".to_owned());
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool and open its first connection.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(config.url.expose_secret())
        .await
}

/// Confirm the database accepts queries with the configured credentials.
///
/// # Errors
///
/// Returns `sqlx::Error` if the round trip fails.
pub async fn authenticate(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Bring the schema up to date. Every migration is create-if-absent, so this
/// is safe to run on each start.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the recorded history
/// diverges from the embedded migrations.
pub async fn sync(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Lightweight liveness query used by the keep-alive task and readiness probe.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be reached.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
    async fn test_ping_and_resync(pool: PgPool) {
        authenticate(&pool).await.expect("authenticate");
        ping(&pool).await.expect("ping");
        // Already migrated by the test harness; running again is a no-op.
        sync(&pool).await.expect("second sync");
    }
}
