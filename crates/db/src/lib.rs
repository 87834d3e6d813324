//! Persistence for users, the live refresh-token ledger, and notes.
//!
//! The service layer talks to storage only through the traits in
//! [`store`]. [`PgStore`] backs them with PostgreSQL via the repositories in
//! [`repositories`]; [`MemoryStore`] keeps everything in process for tests
//! and local runs.

pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{LiveTokenStore, NoteStore, PgStore, UserStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
