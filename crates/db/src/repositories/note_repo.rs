//! Repository for the `notes` table.
//!
//! These queries do not check ownership. Callers go through the ownership
//! guard for single-note access and use [`NoteRepo::list_by_owner`] for
//! listing.

use inotebook_core::notes::{NoteDraft, NotePatch};
use inotebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::Note;

/// Column list for notes queries.
const COLUMNS: &str = "id, user_id, title, description, tag, created_at";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Create a note owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &NoteDraft,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (user_id, title, description, tag)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.tag)
            .fetch_one(pool)
            .await
    }

    /// Find a note by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all notes owned by `user_id`, newest first.
    pub async fn list_by_owner(pool: &PgPool, user_id: DbId) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Absent fields keep their stored value.
    /// The owner column is never written.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NotePatch,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                tag = COALESCE($4, tag)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.tag)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
