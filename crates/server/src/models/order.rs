//! Orders. One order line per row: a menu item, a quantity and the total
//! agreed at the counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use resto_core::{MenuItemId, OrderId, OrderStatus, Price, UserId};

use super::validation::{self, Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<UserId>,
    pub menu_item_id: MenuItemId,
    pub customer_name: String,
    pub quantity: i32,
    pub total_price: Price,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub menu_item_id: MenuItemId,
    pub customer_name: String,
    pub quantity: i32,
    pub total_price: Price,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Validate for NewOrder {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::name("customer_name", &self.customer_name)?;
        validation::positive("quantity", self.quantity)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderChanges {
    pub user_id: Option<UserId>,
    pub menu_item_id: Option<MenuItemId>,
    pub customer_name: Option<String>,
    pub quantity: Option<i32>,
    pub total_price: Option<Price>,
    pub status: Option<OrderStatus>,
    pub notes: Option<String>,
}

impl Validate for OrderChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        let empty = self.user_id.is_none()
            && self.menu_item_id.is_none()
            && self.customer_name.is_none()
            && self.quantity.is_none()
            && self.total_price.is_none()
            && self.status.is_none()
            && self.notes.is_none();
        if empty {
            return Err(ValidationError::NoChanges);
        }
        validation::optional_name("customer_name", self.customer_name.as_deref())?;
        self.quantity
            .map_or(Ok(()), |q| validation::positive("quantity", q))
    }
}
