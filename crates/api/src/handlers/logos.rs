//! Logo directory listing.

use std::path::Path;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// File extensions listed as logos (compared case-insensitively).
pub const LOGO_EXTENSIONS: &[&str] = &["png", "svg", "jpg", "jpeg", "webp", "gif"];

/// GET /api/logos
///
/// Bare JSON array of logo file names, sorted. Responds
/// `500 {"error": "Failed to read logo directory"}` when the directory
/// cannot be read.
pub async fn list(State(state): State<AppState>) -> Response {
    match list_logos(&state.config.logo_dir).await {
        Ok(names) => Json(names).into_response(),
        Err(e) => {
            tracing::error!(
                dir = %state.config.logo_dir.display(),
                error = %e,
                "Failed to read logo directory"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to read logo directory" })),
            )
                .into_response()
        }
    }
}

/// Names of the image files directly inside `dir`, sorted.
pub async fn list_logos(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_logo_file(name) {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    Ok(names)
}

pub fn is_logo_file(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => LOGO_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        _ => false,
    }
}
