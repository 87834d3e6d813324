//! Repository for the `live_tokens` table (refresh-token ledger).

use inotebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::live_token::{CreateLiveToken, LiveToken};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, token_hash, expires_at, created_at";

/// Provides insert, membership, and removal for ledger rows.
pub struct LiveTokenRepo;

impl LiveTokenRepo {
    /// Record a newly issued refresh token, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLiveToken,
    ) -> Result<LiveToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO live_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LiveToken>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Whether a row with this token hash exists. Expiry is not consulted;
    /// the token's own `exp` claim covers that.
    pub async fn exists(pool: &PgPool, token_hash: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM live_tokens WHERE token_hash = $1)")
                .bind(token_hash)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Delete the row with this token hash. Returns `true` if a row was removed.
    pub async fn delete_by_hash(pool: &PgPool, token_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM live_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete rows whose refresh token has expired. Returns the count removed.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM live_tokens WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
