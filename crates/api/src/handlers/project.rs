//! Handlers for the admin `/projects` resource.
//!
//! Create and update take multipart forms because they carry image files.
//! Image storage ordering is handled by [`folio_core::uploads`].

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_core::uploads::{cleanup_urls, create_with_images, update_with_images};
use folio_db::models::project::{CreateProject, Project, ProjectWithCategory, UpdateProject};
use folio_db::repositories::{CategoryRepo, ProjectRepo};
use folio_db::DbPool;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::forms::ProjectForm;
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// A saved project plus the names of new images that could not be stored.
#[derive(Debug, Serialize)]
pub struct SavedProject {
    #[serde(flatten)]
    pub project: Project,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_images: Vec<String>,
}

/// POST /api/v1/admin/projects
///
/// Every image must upload before the row is written; see
/// [`create_with_images`].
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let form = ProjectForm::from_multipart(&mut multipart).await?;

    let input = CreateProject {
        category_id: form.category_id()?,
        title: form.title(),
        description: form.description.clone(),
        tags: form.tags(),
        link_url: form.link_url.clone(),
        image_urls: Vec::new(),
        sort_order: form.sort_order()?,
    }
    .normalized();
    input.validate()?;
    ensure_category_exists(&state.pool, input.category_id).await?;

    let pool = state.pool.clone();
    let project = create_with_images(
        &*state.storage,
        state.image_bucket(),
        form.images,
        move |image_urls| insert_project(pool, input, image_urls),
    )
    .await?;

    tracing::info!(
        project_id = project.id,
        images = project.image_urls.len(),
        "Project created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/admin/projects
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProjectWithCategory>>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/admin/projects/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = find_project(&state.pool, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/admin/projects/{id}
///
/// Replaces every field. New `images` are appended, `remove_images` URLs are
/// dropped and deleted from storage once the row is saved.
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<SavedProject>>> {
    let existing = find_project(&state.pool, id).await?;
    let form = ProjectForm::from_multipart(&mut multipart).await?;

    let input = UpdateProject {
        category_id: form.category_id()?,
        title: form.title(),
        description: form.description.clone(),
        tags: form.tags(),
        link_url: form.link_url.clone(),
        image_urls: Vec::new(),
        sort_order: form.sort_order()?,
    }
    .normalized();
    input.validate()?;
    ensure_category_exists(&state.pool, input.category_id).await?;

    let pool = state.pool.clone();
    let outcome = update_with_images(
        &*state.storage,
        state.image_bucket(),
        &existing.image_urls,
        &form.remove_images,
        form.images,
        move |image_urls| save_project(pool, id, input, image_urls),
    )
    .await?;

    if !outcome.skipped.is_empty() {
        tracing::warn!(
            project_id = id,
            skipped = ?outcome.skipped,
            "Project saved without some new images"
        );
    }
    tracing::info!(
        project_id = id,
        images = outcome.plan.final_urls.len(),
        removed = outcome.plan.to_delete.len(),
        "Project updated"
    );

    Ok(Json(DataResponse {
        data: SavedProject {
            project: outcome.value,
            skipped_images: outcome.skipped,
        },
    }))
}

/// DELETE /api/v1/admin/projects/{id}
///
/// The row goes first; stored images are removed afterwards, best-effort.
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = ProjectRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    tracing::info!(project_id = id, "Project deleted");

    cleanup_urls(&*state.storage, state.image_bucket(), &project.image_urls).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_project(pool: &DbPool, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Reject unknown categories before any image is uploaded.
async fn ensure_category_exists(pool: &DbPool, category_id: DbId) -> AppResult<()> {
    match CategoryRepo::find_by_id(pool, category_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::Core(CoreError::Validation(format!(
            "Category {category_id} does not exist"
        )))),
    }
}

async fn insert_project(
    pool: DbPool,
    input: CreateProject,
    image_urls: Vec<String>,
) -> AppResult<Project> {
    let input = CreateProject { image_urls, ..input };
    Ok(ProjectRepo::create(&pool, &input).await?)
}

async fn save_project(
    pool: DbPool,
    id: DbId,
    input: UpdateProject,
    image_urls: Vec<String>,
) -> AppResult<Project> {
    let input = UpdateProject { image_urls, ..input };
    ProjectRepo::update(&pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}
