//! Admin dashboard overview and icon catalogue.

use axum::extract::State;
use axum::Json;
use folio_core::icons::available_icons;
use folio_db::models::category::Category;
use folio_db::models::cv::Cv;
use folio_db::models::project::ProjectWithCategory;
use folio_db::repositories::{CategoryRepo, CvRepo, ProjectRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Everything the dashboard shows after a refresh.
#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    pub categories: Vec<Category>,
    pub projects: Vec<ProjectWithCategory>,
    pub cvs: Vec<Cv>,
}

/// GET /api/v1/admin/overview
pub async fn overview(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardOverview>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    let projects = ProjectRepo::list(&state.pool).await?;
    let cvs = CvRepo::list(&state.pool).await?;

    Ok(Json(DataResponse {
        data: DashboardOverview {
            categories,
            projects,
            cvs,
        },
    }))
}

/// GET /api/v1/admin/icons
pub async fn icons(_admin: RequireAdmin) -> Json<DataResponse<&'static [&'static str]>> {
    Json(DataResponse {
        data: available_icons(),
    })
}
