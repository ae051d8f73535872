//! Category entity model and DTOs.

use folio_core::portfolio::CategoryEntry;
use folio_core::text::{non_empty, sort_order_or_none};
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub icon_name: String,
    /// Category description shown on the public page.
    pub content: Option<String>,
    pub sort_order: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Category> for CategoryEntry {
    fn from(category: Category) -> Self {
        CategoryEntry {
            id: category.id,
            name: category.name,
            icon_name: category.icon_name,
            content: category.content,
        }
    }
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Icon name is required"))]
    pub icon_name: String,
    pub content: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for editing a category. The submitted form replaces every column.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Icon name is required"))]
    pub icon_name: String,
    pub content: Option<String>,
    pub sort_order: Option<i32>,
}

impl CreateCategory {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            icon_name: self.icon_name.trim().to_string(),
            content: non_empty(self.content),
            sort_order: sort_order_or_none(self.sort_order),
        }
    }
}

impl UpdateCategory {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            icon_name: self.icon_name.trim().to_string(),
            content: non_empty(self.content),
            sort_order: sort_order_or_none(self.sort_order),
        }
    }
}
