pub mod admin;
pub mod health;
pub mod logos;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /portfolio                         categories with projects (public)
/// /portfolio/cards                   hero cards (public)
/// /cv/active                         active CV (public)
/// /cv/download                       redirect to active CV (public)
///
/// /admin/overview                    categories, projects, CVs
/// /admin/icons                       selectable category icons
/// /admin/categories                  list, create
/// /admin/categories/{id}             get, update, delete
/// /admin/projects                    list, create (multipart)
/// /admin/projects/{id}               get, update (multipart), delete
/// /admin/cvs                         list, upload (multipart)
/// /admin/cvs/{id}                    delete
/// /admin/cvs/{id}/activate           activate (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(public::router())
        .nest("/admin", admin::router())
}
