use std::sync::Arc;

use inotebook_db::{DbPool, LiveTokenStore, MemoryStore, NoteStore, PgStore, UserStore};

use crate::auth::password::generate_dummy_hash;
use crate::auth::tokens::TokenService;
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing in it is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Credential store.
    pub users: Arc<dyn UserStore>,
    /// Note records.
    pub notes: Arc<dyn NoteStore>,
    /// Token issuance and verification, backed by the live token ledger.
    pub tokens: TokenService,
    /// Hash compared against when a login names an unknown email.
    pub dummy_hash: Arc<str>,
    /// Database pool when running on PostgreSQL; used by the health check.
    pub pool: Option<DbPool>,
}

impl AppState {
    /// State backed by PostgreSQL.
    pub fn postgres(config: ServerConfig, pool: DbPool) -> AppResult<Self> {
        let store = PgStore::new(pool.clone());
        let mut state = Self::with_store(config, store)?;
        state.pool = Some(pool);
        Ok(state)
    }

    /// State backed by an in-process store.
    pub fn in_memory(config: ServerConfig, store: MemoryStore) -> AppResult<Self> {
        Self::with_store(config, store)
    }

    fn with_store<S>(config: ServerConfig, store: S) -> AppResult<Self>
    where
        S: UserStore + LiveTokenStore + NoteStore + Clone + 'static,
    {
        let dummy_hash = generate_dummy_hash()
            .map_err(|e| AppError::InternalError(format!("Dummy hash generation failed: {e}")))?;
        let tokens = TokenService::new(config.jwt.clone(), Arc::new(store.clone()));

        Ok(Self {
            config: Arc::new(config),
            users: Arc::new(store.clone()),
            notes: Arc::new(store),
            tokens,
            dummy_hash: dummy_hash.into(),
            pool: None,
        })
    }
}
