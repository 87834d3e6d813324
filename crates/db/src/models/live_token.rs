//! Live refresh-token ledger rows.

use inotebook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One currently-valid refresh token, identified by the SHA-256 digest of
/// the signed token string.
#[derive(Debug, Clone, FromRow)]
pub struct LiveToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for recording a freshly issued refresh token.
#[derive(Debug, Clone)]
pub struct CreateLiveToken {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
