//! Repository for the `cvs` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::cv::{CreateCv, Cv};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, file_name, storage_path, public_url, is_active, uploaded_at";

/// Provides CRUD operations for CVs and manages the active flag.
pub struct CvRepo;

impl CvRepo {
    /// Record an uploaded CV. New rows are inactive.
    pub async fn create(pool: &PgPool, input: &CreateCv) -> Result<Cv, sqlx::Error> {
        let query = format!(
            "INSERT INTO cvs (file_name, storage_path, public_url, is_active)
             VALUES ($1, $2, $3, false)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cv>(&query)
            .bind(&input.file_name)
            .bind(&input.storage_path)
            .bind(&input.public_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Cv>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cvs WHERE id = $1");
        sqlx::query_as::<_, Cv>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List CVs, most recently uploaded first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Cv>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cvs ORDER BY uploaded_at DESC, id DESC");
        sqlx::query_as::<_, Cv>(&query).fetch_all(pool).await
    }

    /// The CV currently offered for download, if any.
    pub async fn find_active(pool: &PgPool) -> Result<Option<Cv>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cvs WHERE is_active = true");
        sqlx::query_as::<_, Cv>(&query).fetch_optional(pool).await
    }

    /// Make `id` the only active CV.
    ///
    /// Deactivates the current active CV and activates `id` in one
    /// transaction. Returns `None` (and leaves the previous active CV in
    /// place) if `id` does not exist.
    pub async fn set_active(pool: &PgPool, id: DbId) -> Result<Option<Cv>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Unmark current active (if any)
        sqlx::query("UPDATE cvs SET is_active = false WHERE is_active = true")
            .execute(&mut *tx)
            .await?;

        // Mark the specified CV as active
        let query = format!("UPDATE cvs SET is_active = true WHERE id = $1 RETURNING {COLUMNS}");
        let activated = sqlx::query_as::<_, Cv>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        match activated {
            Some(cv) => {
                tx.commit().await?;
                Ok(Some(cv))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Delete a CV row, returning it so the stored file can be removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Cv>, sqlx::Error> {
        let query = format!("DELETE FROM cvs WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Cv>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
