//! Repository for the `categories` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, icon_name, content, sort_order, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, icon_name, content, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.icon_name)
            .bind(&input.content)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List categories by explicit sort order (unsorted last), then name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories ORDER BY sort_order ASC NULLS LAST, name ASC"
        );
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Replace every editable column of a category.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = $2,
                icon_name = $3,
                content = $4,
                sort_order = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.icon_name)
            .bind(&input.content)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Its projects go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
