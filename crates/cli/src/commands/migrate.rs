//! Schema migration command.
//!
//! Applies the migrations embedded in `resto-server`. The server also runs
//! them on every start, so this is only needed to prepare a database ahead
//! of a deploy.

use resto_server::db;

use super::{CommandError, connect};

/// Run all pending migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    db::sync(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
