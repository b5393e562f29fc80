//! API keys for programmatic access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use resto_core::{ApiKeyId, UserId};

use super::validation::{self, Validate, ValidationError};

/// Stored key metadata. The key itself is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ApiKey {
    pub id: ApiKeyId,
    pub user_id: UserId,
    pub name: String,
    pub key_prefix: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// A freshly issued key. `key` is shown to the caller exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedApiKey {
    #[serde(flatten)]
    pub metadata: ApiKey,
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewApiKey {
    pub name: String,
}

impl Validate for NewApiKey {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::name("name", &self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyApiKey {
    pub key: String,
}

impl Validate for VerifyApiKey {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.key.trim().is_empty() {
            return Err(ValidationError::Empty { field: "key" });
        }
        Ok(())
    }
}
