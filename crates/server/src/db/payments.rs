//! Payment repository.

use sqlx::PgPool;

use resto_core::PaymentId;

use super::RepositoryError;
use crate::models::{NewPayment, Payment, PaymentChanges};

const PAYMENT_COLUMNS: &str = "id, order_id, amount, method, status, paid_at, created_at, updated_at";

/// Repository for payments.
pub struct PaymentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all payments ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Payment>, RepositoryError> {
        let rows = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: PaymentId) -> Result<Option<Payment>, RepositoryError> {
        let row = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the order does not exist.
    pub async fn create(&self, new: &NewPayment) -> Result<Payment, RepositoryError> {
        sqlx::query_as::<_, Payment>(&format!(
            "INSERT INTO payments (order_id, amount, method, status, paid_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(new.order_id)
        .bind(new.amount)
        .bind(new.method)
        .bind(new.status)
        .bind(new.paid_at)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the payment does not exist.
    pub async fn update(
        &self,
        id: PaymentId,
        changes: &PaymentChanges,
    ) -> Result<Payment, RepositoryError> {
        sqlx::query_as::<_, Payment>(&format!(
            "UPDATE payments SET
                 order_id = COALESCE($2, order_id),
                 amount = COALESCE($3, amount),
                 method = COALESCE($4, method),
                 status = COALESCE($5, status),
                 paid_at = COALESCE($6, paid_at),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.order_id)
        .bind(changes.amount)
        .bind(changes.method)
        .bind(changes.status)
        .bind(changes.paid_at)
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the payment does not exist.
    pub async fn delete(&self, id: PaymentId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
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
