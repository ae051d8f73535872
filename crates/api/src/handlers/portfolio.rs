//! Public portfolio endpoints.

use axum::extract::State;
use axum::Json;
use folio_core::portfolio::{assemble, display_cards, DisplayCard, PortfolioCategory};
use folio_db::repositories::{CategoryRepo, ProjectRepo};
use folio_db::DbPool;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/portfolio
///
/// Every category with its projects, in listing order.
pub async fn portfolio(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PortfolioCategory>>>> {
    let categories = load_portfolio(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/portfolio/cards
pub async fn cards(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<DisplayCard>>>> {
    let categories = load_portfolio(&state.pool).await?;
    Ok(Json(DataResponse {
        data: display_cards(&categories),
    }))
}

async fn load_portfolio(pool: &DbPool) -> AppResult<Vec<PortfolioCategory>> {
    let categories = CategoryRepo::list(pool).await?;
    let projects = ProjectRepo::list_plain(pool).await?;
    Ok(assemble(
        categories.into_iter().map(Into::into).collect(),
        projects.into_iter().map(Into::into).collect(),
    ))
}
