//! Handlers for the admin `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::icons::validate_icon;
use folio_core::types::DbId;
use folio_core::uploads::cleanup_urls;
use folio_db::models::category::{Category, CreateCategory, UpdateCategory};
use folio_db::repositories::{CategoryRepo, ProjectRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/categories
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    let input = input.normalized();
    input.validate()?;
    validate_icon(&input.icon_name)?;

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/admin/categories
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/admin/categories/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/admin/categories/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    let input = input.normalized();
    input.validate()?;
    validate_icon(&input.icon_name)?;

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    tracing::info!(category_id = id, "Category updated");
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Projects of the category are removed with it (cascade); their images
/// are then removed from storage on a best-effort basis.
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let image_urls: Vec<String> = ProjectRepo::list_by_category(&state.pool, id)
        .await?
        .into_iter()
        .flat_map(|project| project.image_urls)
        .collect();

    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }
    tracing::info!(category_id = id, images = image_urls.len(), "Category deleted");

    cleanup_urls(&*state.storage, state.image_bucket(), &image_urls).await;
    Ok(StatusCode::NO_CONTENT)
}
