//! Ownership guard for note records.
//!
//! Every read-single, update, and delete of a note goes through
//! [`OwnedNote`]. Listing does not; it filters by owner in the query.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use inotebook_core::error::CoreError;
use inotebook_core::types::DbId;
use inotebook_db::models::note::Note;
use inotebook_db::NoteStore;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Fetch `note_id` and confirm `user_id` owns it.
///
/// Absent notes are 404; notes owned by someone else are 403.
pub async fn authorize_note(
    notes: &dyn NoteStore,
    user_id: DbId,
    note_id: DbId,
) -> AppResult<Note> {
    let note = notes
        .find_note(note_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Note",
            id: note_id,
        }))?;

    if note.user_id != user_id {
        tracing::warn!(user_id, note_id, owner_id = note.user_id, "Note access denied");
        return Err(AppError::Core(CoreError::Forbidden("Forbidden".into())));
    }

    Ok(note)
}

/// A note from the `{id}` path segment that the authenticated caller owns.
///
/// Runs the access-token check first, then the ownership check.
#[derive(Debug, Clone)]
pub struct OwnedNote {
    pub user: AuthUser,
    pub note: Note,
}

impl FromRequestParts<AppState> for OwnedNote {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        let Path(note_id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("Invalid note ID".into()))?;

        let note = authorize_note(state.notes.as_ref(), user.user_id, note_id).await?;

        Ok(OwnedNote { user, note })
    }
}
