//! Refresh-token cookie extractor shared by refresh, logout, and remember-me.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use inotebook_core::types::DbId;

use crate::auth::cookie::{get_cookie, REFRESH_COOKIE_NAME};
use crate::error::AppError;
use crate::state::AppState;

/// A refresh token from the `refreshToken` cookie that is in the live
/// token ledger and carries a valid signature and expiry.
#[derive(Debug, Clone)]
pub struct RefreshSession {
    pub user_id: DbId,
    /// The presented token, needed to revoke it on logout.
    pub token: String,
}

impl FromRequestParts<AppState> for RefreshSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = get_cookie(&parts.headers, REFRESH_COOKIE_NAME)
            .ok_or_else(AppError::invalid_token)?
            .to_owned();

        let user_id = state.tokens.verify_refresh_token(&token).await?;

        Ok(RefreshSession { user_id, token })
    }
}
