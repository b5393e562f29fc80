//! User repository.

use sqlx::PgPool;

use resto_core::{Email, UserId, UserRole};

use super::RepositoryError;
use crate::models::{User, UserChanges};

const USER_COLUMNS: &str = "id, name, email, role, created_at, updated_at";

/// A user row together with its password hash, for login only.
#[derive(Debug, sqlx::FromRow)]
pub struct UserCredentials {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all users ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(users)
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    /// Look up a user and their password hash by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let row = sqlx::query_as::<_, UserCredentials>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// Create a user with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(name.trim())
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)
    }

    /// Apply a partial update. `password_hash` replaces the stored hash when set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    /// Returns `RepositoryError::Conflict` if the new email is taken.
    pub async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
        password_hash: Option<&str>,
    ) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                 name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 password_hash = COALESCE($4, password_hash),
                 role = COALESCE($5, role),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name.as_deref().map(str::trim))
        .bind(changes.email.as_ref())
        .bind(password_hash)
        .bind(changes.role)
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a user. Their tokens and API keys go with them; their orders
    /// are kept with `user_id` cleared.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    pub async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(RepositoryError::from_delete)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).expect("valid email")
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
    async fn test_create_update_delete(pool: PgPool) {
        let repo = UserRepository::new(&pool);
        let user = repo
            .create("Sari", &email("sari@resto.id"), "$argon2id$fake", UserRole::Cashier)
            .await
            .expect("create");
        assert_eq!(user.role, UserRole::Cashier);

        let changes = UserChanges {
            name: Some("Sari W.".to_string()),
            ..UserChanges::default()
        };
        let updated = repo.update(user.id, &changes, None).await.expect("update");
        assert_eq!(updated.name, "Sari W.");
        assert_eq!(updated.email, user.email);

        let creds = repo
            .get_credentials(&user.email)
            .await
            .expect("query")
            .expect("present");
        assert_eq!(creds.password_hash, "$argon2id$fake");

        repo.delete(user.id).await.expect("delete");
        assert!(repo.get(user.id).await.expect("query").is_none());
        assert!(matches!(
            repo.delete(user.id).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
    async fn test_duplicate_email_conflicts(pool: PgPool) {
        let repo = UserRepository::new(&pool);
        repo.create("A", &email("a@resto.id"), "h", UserRole::Customer)
            .await
            .expect("first");
        let err = repo
            .create("B", &email("A@resto.id"), "h", UserRole::Customer)
            .await
            .expect_err("duplicate");
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
