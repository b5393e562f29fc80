//! Order repository.

use sqlx::PgPool;

use resto_core::OrderId;

use super::RepositoryError;
use crate::models::{NewOrder, Order, OrderChanges};

const ORDER_COLUMNS: &str = "id, user_id, menu_item_id, customer_name, quantity, total_price, \
                             status, notes, created_at, updated_at";

/// Repository for orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the menu item or user
    /// does not exist.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (user_id, menu_item_id, customer_name, quantity, total_price, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(new.user_id)
        .bind(new.menu_item_id)
        .bind(new.customer_name.trim())
        .bind(new.quantity)
        .bind(new.total_price)
        .bind(new.status)
        .bind(new.notes.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    /// Returns `RepositoryError::InvalidReference` for dangling references.
    pub async fn update(
        &self,
        id: OrderId,
        changes: &OrderChanges,
    ) -> Result<Order, RepositoryError> {
        sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET
                 user_id = COALESCE($2, user_id),
                 menu_item_id = COALESCE($3, menu_item_id),
                 customer_name = COALESCE($4, customer_name),
                 quantity = COALESCE($5, quantity),
                 total_price = COALESCE($6, total_price),
                 status = COALESCE($7, status),
                 notes = COALESCE($8, notes),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.user_id)
        .bind(changes.menu_item_id)
        .bind(changes.customer_name.as_deref().map(str::trim))
        .bind(changes.quantity)
        .bind(changes.total_price)
        .bind(changes.status)
        .bind(changes.notes.as_deref())
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete an order and its payments.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
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
