//! Menu items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use resto_core::{CategoryId, MenuItemId, Price};

use super::validation::{self, Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub category_id: Option<CategoryId>,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
}

const fn available_by_default() -> bool {
    true
}

impl Validate for NewMenuItem {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::name("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category_id: Option<CategoryId>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

impl Validate for MenuItemChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        let empty = self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
            && self.image_url.is_none()
            && self.is_available.is_none();
        if empty {
            return Err(ValidationError::NoChanges);
        }
        validation::optional_name("name", self.name.as_deref())
    }
}
