//! CV entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `cvs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cv {
    pub id: DbId,
    /// Name of the file as uploaded by the admin.
    pub file_name: String,
    /// Object key inside the CV bucket.
    pub storage_path: String,
    pub public_url: String,
    pub is_active: bool,
    pub uploaded_at: Timestamp,
}

/// DTO for recording an uploaded CV. New CVs start inactive.
#[derive(Debug, Clone)]
pub struct CreateCv {
    pub file_name: String,
    pub storage_path: String,
    pub public_url: String,
}
