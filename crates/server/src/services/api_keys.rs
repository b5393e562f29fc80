//! API key issuing and verification.
//!
//! Keys look like `rk_<43 base64url chars>`. The first 11 characters are kept
//! in clear so users can tell their keys apart; the rest is only stored as a
//! digest.

use serde::Serialize;
use sqlx::PgPool;

use resto_core::{ApiKeyId, UserId};

use super::secret;
use crate::db::{ApiKeyRepository, RepositoryError};
use crate::models::{ApiKey, IssuedApiKey, NewApiKey};

/// Prefix marking a string as one of our API keys.
pub const KEY_PREFIX: &str = "rk_";

const DISPLAY_PREFIX_LEN: usize = 11;

/// Result of checking a presented key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyVerification {
    pub valid: bool,
    pub user_id: Option<UserId>,
}

/// Service for API key management.
pub struct ApiKeyService<'a> {
    keys: ApiKeyRepository<'a>,
}

impl<'a> ApiKeyService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            keys: ApiKeyRepository::new(pool),
        }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, owner: UserId) -> Result<Vec<ApiKey>, RepositoryError> {
        self.keys.list_for_user(owner).await
    }

    /// Issue a key for `owner`. The plaintext is returned once and not kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn issue(
        &self,
        owner: UserId,
        request: &NewApiKey,
    ) -> Result<IssuedApiKey, RepositoryError> {
        let key = format!("{KEY_PREFIX}{}", secret::generate());
        let metadata = self
            .keys
            .create(owner, &request.name, display_prefix(&key), &secret::digest(&key))
            .await?;

        tracing::info!(api_key_id = %metadata.id, user_id = %owner, "API key issued");
        Ok(IssuedApiKey { metadata, key })
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the key is not `owner`'s or is
    /// already revoked.
    pub async fn revoke(&self, owner: UserId, id: ApiKeyId) -> Result<(), RepositoryError> {
        self.keys.revoke(id, owner).await?;
        tracing::info!(api_key_id = %id, user_id = %owner, "API key revoked");
        Ok(())
    }

    /// Check a presented key. Malformed keys are rejected without a query.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the lookup fails.
    pub async fn verify(&self, presented: &str) -> Result<KeyVerification, RepositoryError> {
        let presented = presented.trim();
        if !presented.starts_with(KEY_PREFIX) {
            return Ok(KeyVerification {
                valid: false,
                user_id: None,
            });
        }

        let user_id = self.keys.touch(&secret::digest(presented)).await?;
        Ok(KeyVerification {
            valid: user_id.is_some(),
            user_id,
        })
    }
}

fn display_prefix(key: &str) -> &str {
    key.get(..DISPLAY_PREFIX_LEN).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use resto_core::{Email, UserRole};
    use sqlx::PgPool;

    use super::*;
    use crate::db::UserRepository;

    #[test]
    fn test_display_prefix() {
        assert_eq!(display_prefix("rk_abcdefghijklmnop"), "rk_abcdefgh");
        assert_eq!(display_prefix("rk_ab"), "rk_ab");
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
    async fn test_issue_verify_revoke(pool: PgPool) {
        let owner = UserRepository::new(&pool)
            .create("Rina", &Email::parse("rina@resto.id").expect("email"), "h", UserRole::Admin)
            .await
            .expect("owner");

        let service = ApiKeyService::new(&pool);
        let issued = service
            .issue(owner.id, &NewApiKey { name: "pos".to_string() })
            .await
            .expect("issue");
        assert!(issued.key.starts_with(KEY_PREFIX));
        assert_eq!(issued.metadata.key_prefix, &issued.key[..DISPLAY_PREFIX_LEN]);

        let check = service.verify(&issued.key).await.expect("verify");
        assert_eq!(
            check,
            KeyVerification {
                valid: true,
                user_id: Some(owner.id)
            }
        );

        service.revoke(owner.id, issued.metadata.id).await.expect("revoke");
        assert!(!service.verify(&issued.key).await.expect("verify").valid);
        assert!(!service.verify("not-a-key").await.expect("verify").valid);
    }
}
