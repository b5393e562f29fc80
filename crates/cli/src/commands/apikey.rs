//! API key commands.

use resto_core::Email;
use resto_server::db::UserRepository;
use resto_server::models::NewApiKey;
use resto_server::services::ApiKeyService;

use super::{CommandError, connect};

/// Issue a key for the user with `email` and print it.
pub async fn create(email: &str, name: &str) -> Result<(), CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::InvalidEmail(e.to_string()))?;
    let pool = connect().await?;

    let owner = UserRepository::new(&pool)
        .get_credentials(&email)
        .await?
        .ok_or_else(|| CommandError::UnknownUser(email.to_string()))?
        .user;

    let issued = ApiKeyService::new(&pool)
        .issue(
            owner.id,
            &NewApiKey {
                name: name.to_owned(),
            },
        )
        .await?;

    #[allow(clippy::print_stdout)]
    {
        println!("API key for {} (id {}):", owner.email, issued.metadata.id);
        println!("  {}", issued.key);
        println!("Store it now; it cannot be shown again.");
    }
    Ok(())
}
