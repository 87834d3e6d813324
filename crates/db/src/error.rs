/// PostgreSQL SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Errors returned by every store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique index rejected the write. Carries the constraint name.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Non-SQL backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_unique_violation(&self, constraint: &str) -> bool {
        matches!(self, StoreError::UniqueViolation(name) if name == constraint)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown").to_owned();
                return StoreError::UniqueViolation(constraint);
            }
        }
        StoreError::Database(err)
    }
}
