//! Token service: mints, verifies, and revokes access and refresh tokens.
//!
//! Access tokens never touch storage. Every refresh token issued gets its
//! own ledger row, and a refresh token is honoured only while that row
//! exists, its signature verifies, and it has not expired.

use std::sync::Arc;

use inotebook_core::types::DbId;
use inotebook_db::models::live_token::CreateLiveToken;
use inotebook_db::{LiveTokenStore, StoreError};

use super::jwt::{
    generate_access_token, generate_refresh_token, hash_refresh_token, validate_access_token,
    validate_refresh_token, AccessClaims, TokenConfig,
};

/// Why a token operation failed.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Malformed, wrongly signed, or expired.
    #[error("token failed signature or expiry validation")]
    Invalid,

    /// Well-formed refresh token with no ledger row (logged out or never issued).
    #[error("refresh token is not in the live token ledger")]
    Revoked,

    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A freshly issued access/refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Cheap to clone; holds the shared config and ledger handle.
#[derive(Clone)]
pub struct TokenService {
    config: Arc<TokenConfig>,
    ledger: Arc<dyn LiveTokenStore>,
}

impl TokenService {
    pub fn new(config: TokenConfig, ledger: Arc<dyn LiveTokenStore>) -> Self {
        Self {
            config: Arc::new(config),
            ledger,
        }
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<dyn LiveTokenStore> {
        &self.ledger
    }

    /// Sign a short-lived access token. No persistence.
    pub fn issue_access_token(&self, user_id: DbId) -> Result<String, TokenError> {
        generate_access_token(user_id, &self.config).map_err(TokenError::Signing)
    }

    /// Sign a refresh token and record it in the ledger.
    ///
    /// If the ledger insert fails the token is dropped and never returned.
    pub async fn issue_refresh_token(&self, user_id: DbId) -> Result<String, TokenError> {
        let (token, expires_at) =
            generate_refresh_token(user_id, &self.config).map_err(TokenError::Signing)?;

        self.ledger
            .insert_live_token(&CreateLiveToken {
                user_id,
                token_hash: hash_refresh_token(&token),
                expires_at,
            })
            .await?;

        Ok(token)
    }

    /// Issue an access token and a ledger-backed refresh token.
    pub async fn issue_pair(&self, user_id: DbId) -> Result<TokenPair, TokenError> {
        let access_token = self.issue_access_token(user_id)?;
        let refresh_token = self.issue_refresh_token(user_id).await?;
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Check an access token's signature and expiry.
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        validate_access_token(token, &self.config).map_err(|_| TokenError::Invalid)
    }

    /// Check ledger membership, then signature and expiry. A token absent
    /// from the ledger is rejected without being decoded.
    pub async fn verify_refresh_token(&self, token: &str) -> Result<DbId, TokenError> {
        if !self
            .ledger
            .live_token_exists(&hash_refresh_token(token))
            .await?
        {
            return Err(TokenError::Revoked);
        }

        let claims =
            validate_refresh_token(token, &self.config).map_err(|_| TokenError::Invalid)?;
        Ok(claims.sub)
    }

    /// Remove a refresh token from the ledger. Returns `false` if it was
    /// already gone.
    pub async fn revoke_refresh_token(&self, token: &str) -> Result<bool, TokenError> {
        Ok(self
            .ledger
            .delete_live_token(&hash_refresh_token(token))
            .await?)
    }
}
