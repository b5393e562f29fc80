//! Login token maintenance.

use resto_server::db::AuthTokenRepository;

use super::{CommandError, connect};

/// Delete expired bearer tokens.
pub async fn prune() -> Result<(), CommandError> {
    let pool = connect().await?;
    let removed = AuthTokenRepository::new(&pool).delete_expired().await?;
    tracing::info!("Removed {removed} expired token(s)");
    Ok(())
}
