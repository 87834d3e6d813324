//! Storage traits consumed by the service layer, and their PostgreSQL
//! implementation.
//!
//! Each request awaits these calls sequentially; implementations rely on
//! the backend for per-row atomicity and on unique indexes (not
//! application locks) to settle races.

use async_trait::async_trait;
use inotebook_core::notes::{NoteDraft, NotePatch};
use inotebook_core::types::DbId;

use crate::error::StoreError;
use crate::models::live_token::{CreateLiveToken, LiveToken};
use crate::models::note::Note;
use crate::models::user::{CreateUser, User};
use crate::repositories::{LiveTokenRepo, NoteRepo, UserRepo};
use crate::DbPool;

/// Credential store: user identities and password hashes.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user. A duplicate email (ignoring case) fails with
    /// [`StoreError::UniqueViolation`] naming `uq_users_email`.
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError>;

    /// Case-insensitive lookup.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Live token ledger: the allow-list of refresh tokens that may still be used.
#[async_trait]
pub trait LiveTokenStore: Send + Sync {
    async fn insert_live_token(&self, input: &CreateLiveToken) -> Result<LiveToken, StoreError>;

    async fn live_token_exists(&self, token_hash: &str) -> Result<bool, StoreError>;

    /// Remove a ledger row. Removing an absent row is not an error and
    /// returns `false`.
    async fn delete_live_token(&self, token_hash: &str) -> Result<bool, StoreError>;

    /// Remove rows past their expiry. Returns the number removed.
    async fn purge_expired_live_tokens(&self) -> Result<u64, StoreError>;
}

/// Note records. No method here checks ownership.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_note(&self, user_id: DbId, draft: &NoteDraft) -> Result<Note, StoreError>;

    async fn find_note(&self, id: DbId) -> Result<Option<Note>, StoreError>;

    /// Notes owned by `user_id`, newest first.
    async fn list_notes_by_owner(&self, user_id: DbId) -> Result<Vec<Note>, StoreError>;

    async fn update_note(&self, id: DbId, patch: &NotePatch) -> Result<Option<Note>, StoreError>;

    async fn delete_note(&self, id: DbId) -> Result<bool, StoreError>;
}

/// PostgreSQL-backed store. Cheap to clone; all clones share the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }
}

#[async_trait]
impl LiveTokenStore for PgStore {
    async fn insert_live_token(&self, input: &CreateLiveToken) -> Result<LiveToken, StoreError> {
        Ok(LiveTokenRepo::create(&self.pool, input).await?)
    }

    async fn live_token_exists(&self, token_hash: &str) -> Result<bool, StoreError> {
        Ok(LiveTokenRepo::exists(&self.pool, token_hash).await?)
    }

    async fn delete_live_token(&self, token_hash: &str) -> Result<bool, StoreError> {
        Ok(LiveTokenRepo::delete_by_hash(&self.pool, token_hash).await?)
    }

    async fn purge_expired_live_tokens(&self) -> Result<u64, StoreError> {
        Ok(LiveTokenRepo::delete_expired(&self.pool).await?)
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn create_note(&self, user_id: DbId, draft: &NoteDraft) -> Result<Note, StoreError> {
        Ok(NoteRepo::create(&self.pool, user_id, draft).await?)
    }

    async fn find_note(&self, id: DbId) -> Result<Option<Note>, StoreError> {
        Ok(NoteRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_notes_by_owner(&self, user_id: DbId) -> Result<Vec<Note>, StoreError> {
        Ok(NoteRepo::list_by_owner(&self.pool, user_id).await?)
    }

    async fn update_note(&self, id: DbId, patch: &NotePatch) -> Result<Option<Note>, StoreError> {
        Ok(NoteRepo::update(&self.pool, id, patch).await?)
    }

    async fn delete_note(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(NoteRepo::delete(&self.pool, id).await?)
    }
}
