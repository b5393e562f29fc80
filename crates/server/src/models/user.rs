//! User accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use resto_core::{AuthTokenId, Email, UserId, UserRole};

use super::validation::{self, Validate, ValidationError};

/// A user account as returned to clients.
///
/// The password hash lives in the same table but is never selected into
/// this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a user (admin route and self-registration).
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password: String,
    /// Ignored on self-registration, which always creates customers.
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::name("name", &self.name)?;
        validation::password(&self.password)
    }
}

/// Partial update for a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

impl Validate for UserChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_none() && self.email.is_none() && self.password.is_none() && self.role.is_none()
        {
            return Err(ValidationError::NoChanges);
        }
        validation::optional_name("name", self.name.as_deref())?;
        self.password.as_deref().map_or(Ok(()), validation::password)
    }
}

/// The user resolved from a bearer token.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
    pub role: UserRole,
    pub token_id: AuthTokenId,
}
