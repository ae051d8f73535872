//! Bearer-token guard for the admin dashboard routes.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use folio_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the configured `ADMIN_TOKEN`.
///
/// Add it as a handler parameter to restrict the handler to the admin:
///
/// ```ignore
/// async fn admin_only(_admin: RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
///
/// When no token is configured every request is rejected.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.admin_token.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Admin access is not configured".into(),
            ))
        })?;

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        if !tokens_match(token.trim(), expected) {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin token".into(),
            )));
        }

        Ok(RequireAdmin)
    }
}

/// Compare without short-circuiting on the first differing byte.
fn tokens_match(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    if given.len() != expected.len() {
        return false;
    }
    given
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::tokens_match;

    #[test]
    fn equal_tokens_match() {
        assert!(tokens_match("s3cret", "s3cret"));
    }

    #[test]
    fn different_tokens_do_not_match() {
        assert!(!tokens_match("s3cret", "s3creT"));
        assert!(!tokens_match("s3cret", "s3cret-longer"));
        assert!(!tokens_match("", "s3cret"));
    }
}
