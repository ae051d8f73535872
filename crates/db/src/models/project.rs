//! Project entity model and DTOs.

use folio_core::portfolio::ProjectEntry;
use folio_core::text::{non_empty, sort_order_or_none};
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `projects` table.
///
/// `tags` and `image_urls` are nullable arrays in the database; queries
/// coalesce them so they always read back as lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub link_url: Option<String>,
    pub image_urls: Vec<String>,
    pub sort_order: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project joined with the name of its category (admin listing).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    pub category_name: String,
}

impl From<Project> for ProjectEntry {
    fn from(project: Project) -> Self {
        ProjectEntry {
            category_id: project.category_id,
            title: project.title,
            description: project.description,
            tags: project.tags,
            link_url: project.link_url,
            image_urls: project.image_urls,
        }
    }
}

/// DTO for inserting a project. Built by the upload flow once the images
/// are stored, so `image_urls` holds public URLs.
#[derive(Debug, Clone, Validate)]
pub struct CreateProject {
    pub category_id: DbId,
    #[validate(length(min = 1, message = "Project title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub link_url: Option<String>,
    pub image_urls: Vec<String>,
    pub sort_order: Option<i32>,
}

/// DTO for editing a project. The submitted form replaces every column.
#[derive(Debug, Clone, Validate)]
pub struct UpdateProject {
    pub category_id: DbId,
    #[validate(length(min = 1, message = "Project title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub link_url: Option<String>,
    pub image_urls: Vec<String>,
    pub sort_order: Option<i32>,
}

impl CreateProject {
    pub fn normalized(self) -> Self {
        Self {
            category_id: self.category_id,
            title: self.title.trim().to_string(),
            description: non_empty(self.description),
            tags: self.tags,
            link_url: non_empty(self.link_url),
            image_urls: self.image_urls,
            sort_order: sort_order_or_none(self.sort_order),
        }
    }
}

impl UpdateProject {
    pub fn normalized(self) -> Self {
        Self {
            category_id: self.category_id,
            title: self.title.trim().to_string(),
            description: non_empty(self.description),
            tags: self.tags,
            link_url: non_empty(self.link_url),
            image_urls: self.image_urls,
            sort_order: sort_order_or_none(self.sort_order),
        }
    }
}
