//! API key repository. Keys are stored as SHA-256 digests plus a short
//! display prefix.

use sqlx::PgPool;

use resto_core::{ApiKeyId, UserId};

use super::RepositoryError;
use crate::models::ApiKey;

const API_KEY_COLUMNS: &str = "id, user_id, name, key_prefix, created_at, last_used_at, revoked_at";

/// Repository for API keys.
pub struct ApiKeyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ApiKeyRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's active keys, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<ApiKey>, RepositoryError> {
        let rows = sqlx::query_as::<_, ApiKey>(&format!(
            "SELECT {API_KEY_COLUMNS} FROM api_keys
             WHERE user_id = $1 AND revoked_at IS NULL
             ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a digest collision.
    pub async fn create(
        &self,
        user_id: UserId,
        name: &str,
        key_prefix: &str,
        key_hash: &str,
    ) -> Result<ApiKey, RepositoryError> {
        sqlx::query_as::<_, ApiKey>(&format!(
            "INSERT INTO api_keys (user_id, name, key_prefix, key_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {API_KEY_COLUMNS}"
        ))
        .bind(user_id)
        .bind(name.trim())
        .bind(key_prefix)
        .bind(key_hash)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)
    }

    /// Revoke one of `user_id`'s keys.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the key does not exist, belongs
    /// to someone else or is already revoked.
    pub async fn revoke(&self, id: ApiKeyId, user_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE api_keys SET revoked_at = NOW()
             WHERE id = $1 AND user_id = $2 AND revoked_at IS NULL",
        )
        .bind(id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Look up an active key by digest, stamping `last_used_at` on a hit.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn touch(&self, key_hash: &str) -> Result<Option<UserId>, RepositoryError> {
        let owner = sqlx::query_scalar::<_, UserId>(
            "UPDATE api_keys SET last_used_at = NOW()
             WHERE key_hash = $1 AND revoked_at IS NULL
             RETURNING user_id",
        )
        .bind(key_hash)
        .fetch_optional(self.pool)
        .await?;
        Ok(owner)
    }
}

#[cfg(test)]
mod tests {
    use resto_core::{Email, UserRole};
    use sqlx::PgPool;

    use super::*;
    use crate::db::UserRepository;

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
    async fn test_revoked_key_no_longer_verifies(pool: PgPool) {
        let users = UserRepository::new(&pool);
        let owner = users
            .create("Owner", &Email::parse("owner@resto.id").expect("email"), "h", UserRole::Admin)
            .await
            .expect("owner");
        let other = users
            .create("Other", &Email::parse("other@resto.id").expect("email"), "h", UserRole::Cashier)
            .await
            .expect("other");

        let repo = ApiKeyRepository::new(&pool);
        let key = repo
            .create(owner.id, "kasir", "rk_abcdefgh", "digest")
            .await
            .expect("create");
        assert_eq!(repo.touch("digest").await.expect("touch"), Some(owner.id));

        assert!(matches!(
            repo.revoke(key.id, other.id).await,
            Err(RepositoryError::NotFound)
        ));
        let listed = repo.list_for_user(owner.id).await.expect("list");
        assert_eq!(listed.len(), 1);
        assert!(listed[0].last_used_at.is_some());

        repo.revoke(key.id, owner.id).await.expect("revoke");
        assert!(repo.touch("digest").await.expect("touch").is_none());
        assert!(repo.list_for_user(owner.id).await.expect("list").is_empty());
    }
}
