//! User management commands.

use resto_core::{Email, UserId, UserRole};
use resto_server::models::NewUser;
use resto_server::services::AuthService;

use super::{CommandError, connect};

/// Create a user with any role straight against the database, without a
/// running server.
pub async fn create(
    email: &str,
    name: &str,
    password: &str,
    role: &str,
) -> Result<UserId, CommandError> {
    let role: UserRole = role
        .parse()
        .map_err(|_| CommandError::InvalidRole(role.to_owned()))?;
    let email = Email::parse(email).map_err(|e| CommandError::InvalidEmail(e.to_string()))?;

    let pool = connect().await?;

    tracing::info!("Creating user: {} ({})", email, role);
    // Token lifetime is irrelevant here; nothing is logged in.
    let user = AuthService::new(&pool, chrono::Duration::zero())
        .create_user(&NewUser {
            name: name.to_owned(),
            email,
            password: password.to_owned(),
            role: Some(role),
        })
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}, Role: {}",
        user.id,
        user.email,
        user.role
    );
    Ok(user.id)
}
