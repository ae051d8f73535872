//! Repository for the `projects` table.

use folio_core::text::list_or_none;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectWithCategory, UpdateProject};

/// Column list shared across queries to avoid repetition.
///
/// Nullable arrays are coalesced so rows always decode into `Vec<String>`.
const COLUMNS: &str = "id, category_id, title, description, \
    COALESCE(tags, '{}') AS tags, link_url, COALESCE(image_urls, '{}') AS image_urls, \
    sort_order, created_at, updated_at";

/// Same columns qualified for the join with `categories`.
const JOINED_COLUMNS: &str = "p.id, p.category_id, p.title, p.description, \
    COALESCE(p.tags, '{}') AS tags, p.link_url, COALESCE(p.image_urls, '{}') AS image_urls, \
    p.sort_order, p.created_at, p.updated_at, COALESCE(c.name, 'N/A') AS category_name";

/// Listing order: explicit sort order first (unsorted last), newest first.
const ORDER_BY: &str = "sort_order ASC NULLS LAST, created_at DESC";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Fails with a foreign key violation if `category_id` does not exist.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (category_id, title, description, tags, link_url, image_urls, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(list_or_none(&input.tags))
            .bind(&input.link_url)
            .bind(list_or_none(&input.image_urls))
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects with their category names.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p
             LEFT JOIN categories c ON c.id = p.category_id
             ORDER BY p.sort_order ASC NULLS LAST, p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectWithCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the projects of one category.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE category_id = $1 ORDER BY {ORDER_BY}");
        sqlx::query_as::<_, Project>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// List every project in listing order without the category join.
    pub async fn list_plain(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY {ORDER_BY}");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Replace every editable column of a project.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                category_id = $2,
                title = $3,
                description = $4,
                tags = $5,
                link_url = $6,
                image_urls = $7,
                sort_order = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(list_or_none(&input.tags))
            .bind(&input.link_url)
            .bind(list_or_none(&input.image_urls))
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project, returning the removed row so its images can be cleaned up.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("DELETE FROM projects WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
