//! Route definitions for the public site.

use axum::routing::get;
use axum::Router;

use crate::handlers::{cv, portfolio};
use crate::state::AppState;

/// Public routes mounted at `/api/v1`.
///
/// ```text
/// GET /portfolio        -> portfolio
/// GET /portfolio/cards  -> cards
/// GET /cv/active        -> active
/// GET /cv/download      -> download
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio", get(portfolio::portfolio))
        .route("/portfolio/cards", get(portfolio::cards))
        .route("/cv/active", get(cv::active))
        .route("/cv/download", get(cv::download))
}
