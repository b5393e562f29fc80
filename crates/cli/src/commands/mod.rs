//! Subcommand implementations.

pub mod apikey;
pub mod migrate;
pub mod tokens;
pub mod user;

use sqlx::PgPool;
use thiserror::Error;

use resto_server::config::{ConfigError, ServerConfig};
use resto_server::db::{self, RepositoryError};
use resto_server::services::AuthError;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Invalid role: {0}. Valid roles: admin, cashier, customer")]
    InvalidRole(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("No user with email: {0}")]
    UnknownUser(String),
}

/// Connect using the server's database settings.
async fn connect() -> Result<PgPool, CommandError> {
    let config = ServerConfig::from_env()?;
    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&config.database).await?)
}
