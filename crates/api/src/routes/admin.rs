//! Route definitions for the admin dashboard.
//!
//! Every handler takes [`RequireAdmin`](crate::middleware::admin::RequireAdmin).

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{category, cv, overview, project};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /overview               -> overview
/// GET    /icons                  -> icons
///
/// GET    /categories             -> list
/// POST   /categories             -> create
/// GET    /categories/{id}        -> get_by_id
/// PUT    /categories/{id}        -> update
/// DELETE /categories/{id}        -> delete
///
/// GET    /projects               -> list
/// POST   /projects               -> create
/// GET    /projects/{id}          -> get_by_id
/// PUT    /projects/{id}          -> update
/// DELETE /projects/{id}          -> delete
///
/// GET    /cvs                    -> list
/// POST   /cvs                    -> upload
/// DELETE /cvs/{id}               -> delete
/// POST   /cvs/{id}/activate      -> activate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(overview::overview))
        .route("/icons", get(overview::icons))
        .route("/categories", get(category::list).post(category::create))
        .route(
            "/categories/{id}",
            get(category::get_by_id)
                .put(category::update)
                .delete(category::delete),
        )
        .route("/projects", get(project::list).post(project::create))
        .route(
            "/projects/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/cvs", get(cv::list).post(cv::upload))
        .route("/cvs/{id}", delete(cv::delete))
        .route("/cvs/{id}/activate", post(cv::activate))
}
