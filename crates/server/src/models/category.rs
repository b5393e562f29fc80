//! Menu categories, exposed under `/api/kategori`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use resto_core::CategoryId;

use super::validation::{self, Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for NewCategory {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::name("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Validate for CategoryChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_none() && self.description.is_none() {
            return Err(ValidationError::NoChanges);
        }
        validation::optional_name("name", self.name.as_deref())
    }
}
