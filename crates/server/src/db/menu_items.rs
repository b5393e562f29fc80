//! Menu item repository.

use sqlx::PgPool;

use resto_core::MenuItemId;

use super::RepositoryError;
use crate::models::{MenuItem, MenuItemChanges, NewMenuItem};

const MENU_ITEM_COLUMNS: &str = "id, name, description, price, category_id, image_url, \
                                 is_available, created_at, updated_at";

/// Repository for menu items.
pub struct MenuItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuItemRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all menu items ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if `category_id` does not exist.
    pub async fn create(&self, new: &NewMenuItem) -> Result<MenuItem, RepositoryError> {
        sqlx::query_as::<_, MenuItem>(&format!(
            "INSERT INTO menu_items (name, description, price, category_id, image_url, is_available)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {MENU_ITEM_COLUMNS}"
        ))
        .bind(new.name.trim())
        .bind(new.description.as_deref())
        .bind(new.price)
        .bind(new.category_id)
        .bind(new.image_url.as_deref())
        .bind(new.is_available)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist.
    /// Returns `RepositoryError::InvalidReference` if `category_id` does not exist.
    pub async fn update(
        &self,
        id: MenuItemId,
        changes: &MenuItemChanges,
    ) -> Result<MenuItem, RepositoryError> {
        sqlx::query_as::<_, MenuItem>(&format!(
            "UPDATE menu_items SET
                 name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 price = COALESCE($4, price),
                 category_id = COALESCE($5, category_id),
                 image_url = COALESCE($6, image_url),
                 is_available = COALESCE($7, is_available),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {MENU_ITEM_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name.as_deref().map(str::trim))
        .bind(changes.description.as_deref())
        .bind(changes.price)
        .bind(changes.category_id)
        .bind(changes.image_url.as_deref())
        .bind(changes.is_available)
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist.
    /// Returns `RepositoryError::Conflict` if orders still reference it.
    pub async fn delete(&self, id: MenuItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
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
    use resto_core::{CategoryId, Price};
    use sqlx::PgPool;

    use super::*;
    use crate::db::CategoryRepository;
    use crate::models::NewCategory;

    fn nasi_goreng(category_id: Option<CategoryId>) -> NewMenuItem {
        NewMenuItem {
            name: "Nasi Goreng".to_string(),
            description: None,
            price: Price::from_minor_units(2_500_000).expect("price"),
            category_id,
            image_url: None,
            is_available: true,
        }
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
    async fn test_round_trip_and_category_set_null(pool: PgPool) {
        let category = CategoryRepository::new(&pool)
            .create(&NewCategory {
                name: "Makanan".to_string(),
                description: None,
            })
            .await
            .expect("category");

        let repo = MenuItemRepository::new(&pool);
        let item = repo.create(&nasi_goreng(Some(category.id))).await.expect("create");
        assert_eq!(item.price.to_string(), "25000.00");

        let changes = MenuItemChanges {
            is_available: Some(false),
            ..MenuItemChanges::default()
        };
        let updated = repo.update(item.id, &changes).await.expect("update");
        assert!(!updated.is_available);
        assert_eq!(updated.name, item.name);

        CategoryRepository::new(&pool)
            .delete(category.id)
            .await
            .expect("delete category");
        let orphan = repo.get(item.id).await.expect("query").expect("still there");
        assert!(orphan.category_id.is_none());
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
    async fn test_unknown_category_is_invalid_reference(pool: PgPool) {
        let err = MenuItemRepository::new(&pool)
            .create(&nasi_goreng(Some(CategoryId::new(9_999))))
            .await
            .expect_err("dangling category");
        assert!(matches!(err, RepositoryError::InvalidReference(_)));
    }
}
