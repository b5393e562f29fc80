//! Authentication service.
//!
//! Passwords are hashed with Argon2id. A successful login issues an opaque
//! bearer token; the database keeps only its SHA-256 digest and expiry.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use resto_core::{AuthTokenId, Email, UserRole};

use super::secret;
use crate::db::{AuthTokenRepository, RepositoryError, UserRepository};
use crate::models::{CurrentUser, NewUser, User, Validate, ValidationError};

/// Login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }
        if self.password.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }
        Ok(())
    }
}

/// Issued bearer token returned by login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: AuthTokenRepository<'a>,
    token_ttl: chrono::Duration,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, token_ttl: chrono::Duration) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens: AuthTokenRepository::new(pool),
            token_ttl,
        }
    }

    /// Create a user with the role from the payload (customer if absent).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the payload is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn create_user(&self, new: &NewUser) -> Result<User, AuthError> {
        new.validate()?;
        let password_hash = hash_password(&new.password)?;

        self.users
            .create(
                &new.name,
                &new.email,
                &password_hash,
                new.role.unwrap_or_default(),
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })
    }

    /// Self-registration. Always creates a customer, whatever role was sent.
    ///
    /// Roles are labels, not permissions: `POST /api/users` accepts any role.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_user`].
    pub async fn register(&self, new: NewUser) -> Result<User, AuthError> {
        let new = NewUser {
            role: Some(UserRole::Customer),
            ..new
        };
        self.create_user(&new).await
    }

    /// Check credentials and issue a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginSession, AuthError> {
        let email = Email::parse(&credentials.email).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(stored) = self.users.get_credentials(&email).await? else {
            // Match the cost of the found-user path.
            let _ = hash_password(&credentials.password);
            return Err(AuthError::InvalidCredentials);
        };
        verify_password(&credentials.password, &stored.password_hash)?;

        let token = secret::generate();
        let expires_at = token_expiry(Utc::now(), self.token_ttl)?;
        self.tokens
            .create(stored.user.id, &secret::digest(&token), expires_at)
            .await?;

        tracing::info!(user_id = %stored.user.id, "User logged in");

        Ok(LoginSession {
            token,
            expires_at,
            user: stored.user,
        })
    }

    /// Resolve a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is unknown or expired.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AuthError> {
        self.tokens
            .find_user(&secret::digest(token))
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    /// Invalidate a token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the delete fails.
    pub async fn logout(&self, token_id: AuthTokenId) -> Result<(), AuthError> {
        self.tokens.delete(token_id).await?;
        Ok(())
    }
}

/// Expiry for a token issued at `now`.
fn token_expiry(now: DateTime<Utc>, ttl: chrono::Duration) -> Result<DateTime<Utc>, AuthError> {
    now.checked_add_signed(ttl).ok_or(AuthError::TokenLifetime)
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
