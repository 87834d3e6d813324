//! Access-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use inotebook_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Request header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "accesstoken";

/// Authenticated user extracted from the `accessToken` header (or, failing
/// that, an `Authorization: Bearer` header).
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// Role claim from the token; always `"user"` for tokens this service signs.
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = access_token(&parts.headers).ok_or_else(AppError::invalid_token)?;

        let claims = state.tokens.verify_access_token(token)?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

fn access_token(headers: &HeaderMap) -> Option<&str> {
    let from_header = headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    from_header.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn access_token_header_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_TOKEN_HEADER, HeaderValue::from_static("from-header"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-bearer"));
        assert_eq!(access_token(&headers), Some("from-header"));
    }

    #[test]
    fn bearer_is_accepted_as_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(access_token(&headers), Some("abc"));
    }

    #[test]
    fn blank_or_missing_token_is_absent() {
        let mut headers = HeaderMap::new();
        assert_eq!(access_token(&headers), None);
        headers.insert(ACCESS_TOKEN_HEADER, HeaderValue::from_static("  "));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(access_token(&headers), None);
    }
}
