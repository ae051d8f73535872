//! Handlers for CV files: admin management and the public active-CV lookup.

use std::path::Path as FsPath;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::storage::cv_object_key;
use folio_core::types::DbId;
use folio_core::uploads::cleanup_objects;
use folio_db::models::cv::{CreateCv, Cv};
use folio_db::repositories::CvRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::forms::read_file;
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Accepted CV file extensions (lowercase, without the dot).
const SUPPORTED_CV_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// GET /api/v1/admin/cvs
///
/// Newest upload first.
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Cv>>>> {
    let cvs = CvRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: cvs }))
}

/// POST /api/v1/admin/cvs
///
/// Multipart form with a required `file` field. The CV is stored and
/// recorded as inactive.
pub async fn upload(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Cv>>)> {
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            file = read_file(field).await?;
        }
    }

    let file =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    if !is_supported_cv(&file.file_name) {
        return Err(AppError::BadRequest(format!(
            "Unsupported CV format for '{}'. Supported: .pdf, .doc, .docx",
            file.file_name
        )));
    }

    let bucket = state.cv_bucket();
    let key = cv_object_key(&file.file_name, chrono::Utc::now());
    state
        .storage
        .upload(bucket, &key, file.bytes, &file.content_type)
        .await?;

    let input = CreateCv {
        file_name: file.file_name,
        public_url: state.storage.public_url(bucket, &key),
        storage_path: key,
    };

    let cv = match CvRepo::create(&state.pool, &input).await {
        Ok(cv) => cv,
        Err(e) => {
            tracing::warn!(key = %input.storage_path, error = %e, "Recording CV failed, removing stored file");
            cleanup_objects(&*state.storage, bucket, &[input.storage_path.clone()]).await;
            return Err(e.into());
        }
    };

    tracing::info!(cv_id = cv.id, key = %cv.storage_path, "CV uploaded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: cv })))
}

/// POST /api/v1/admin/cvs/{id}/activate
///
/// Marks this CV as the active one, deactivating any other in the same
/// transaction.
pub async fn activate(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Cv>>> {
    let cv = CvRepo::set_active(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Cv", id }))?;
    tracing::info!(cv_id = id, "CV activated");
    Ok(Json(DataResponse { data: cv }))
}

/// DELETE /api/v1/admin/cvs/{id}
///
/// A failure to remove the stored file is logged and does not block the
/// row deletion.
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let cv = CvRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Cv", id }))?;

    if let Err(e) = state
        .storage
        .remove(state.cv_bucket(), &[cv.storage_path.clone()])
        .await
    {
        tracing::warn!(cv_id = id, key = %cv.storage_path, error = %e, "Failed to remove CV file from storage");
    }

    CvRepo::delete(&state.pool, id).await?;
    tracing::info!(cv_id = id, "CV deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/cv/active
pub async fn active(State(state): State<AppState>) -> AppResult<Json<DataResponse<Cv>>> {
    let cv = find_active(&state).await?;
    Ok(Json(DataResponse { data: cv }))
}

/// GET /api/v1/cv/download
///
/// Temporary redirect to the public URL of the active CV.
pub async fn download(State(state): State<AppState>) -> AppResult<Redirect> {
    let cv = find_active(&state).await?;
    Ok(Redirect::temporary(&cv.public_url))
}

async fn find_active(state: &AppState) -> AppResult<Cv> {
    CvRepo::find_active(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("No active CV".into()))
}

fn is_supported_cv(file_name: &str) -> bool {
    FsPath::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_CV_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::is_supported_cv;

    #[test]
    fn accepts_document_extensions_case_insensitively() {
        assert!(is_supported_cv("cv.pdf"));
        assert!(is_supported_cv("Resume.DOCX"));
        assert!(is_supported_cv("old.doc"));
    }

    #[test]
    fn rejects_other_files() {
        assert!(!is_supported_cv("cv.txt"));
        assert!(!is_supported_cv("pdf"));
        assert!(!is_supported_cv("cv.pdf.exe"));
    }
}
