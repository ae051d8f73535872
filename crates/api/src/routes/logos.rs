use axum::routing::get;
use axum::Router;

use crate::handlers::logos;
use crate::state::AppState;

/// Mount `GET /api/logos` (root level, outside the versioned API).
pub fn router() -> Router<AppState> {
    Router::new().route("/api/logos", get(logos::list))
}
