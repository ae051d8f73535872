//! Request extractors whose rejections use the JSON error body.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections (missing fields, bad syntax, wrong content
/// type) reported as [`AppError`] instead of plain text.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
