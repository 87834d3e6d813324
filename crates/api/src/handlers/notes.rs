//! Handlers for the `/notes` resource.
//!
//! Every handler authenticates the caller. Single-note handlers take an
//! [`OwnedNote`], so they only run once the ownership check has passed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inotebook_core::error::CoreError;
use inotebook_core::notes::{draft_note, patch_note};
use inotebook_db::models::note::Note;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::json::JsonBody;
use crate::middleware::ownership::OwnedNote;
use crate::state::AppState;

/// Request body for `POST /notes/addNotes` and `PUT /notes/updateNotes/{id}`.
///
/// Fields stay untyped JSON so the note rules, not the body parser, report
/// wrongly typed values. Absent (or `null`) fields are `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NoteRequest {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub tag: Option<Value>,
}

/// Envelope for a single note.
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub notes: Note,
}

/// Envelope for a list of notes.
#[derive(Debug, Serialize)]
pub struct NoteListResponse {
    pub notes: Vec<Note>,
}

/// GET /api/notes/readNotes
pub async fn read_notes(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<NoteListResponse>> {
    let notes = state.notes.list_notes_by_owner(auth.user_id).await?;
    Ok(Json(NoteListResponse { notes }))
}

/// GET /api/notes/readANote/{id}
pub async fn read_a_note(owned: OwnedNote) -> Json<NoteResponse> {
    Json(NoteResponse { notes: owned.note })
}

/// POST /api/notes/addNotes
pub async fn add_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NoteRequest>,
) -> AppResult<(StatusCode, Json<NoteResponse>)> {
    let draft = draft_note(
        input.title.as_ref(),
        input.description.as_ref(),
        input.tag.as_ref(),
    )?;

    let note = state.notes.create_note(auth.user_id, &draft).await?;

    tracing::info!(user_id = auth.user_id, role = %auth.role, note_id = note.id, "Note created");

    Ok((StatusCode::CREATED, Json(NoteResponse { notes: note })))
}

/// PUT /api/notes/updateNotes/{id}
pub async fn update_notes(
    owned: OwnedNote,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NoteRequest>,
) -> AppResult<Json<NoteResponse>> {
    let patch = patch_note(
        input.title.as_ref(),
        input.description.as_ref(),
        input.tag.as_ref(),
    )?;

    let note_id = owned.note.id;
    let note = state
        .notes
        .update_note(note_id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Note",
            id: note_id,
        }))?;

    tracing::info!(
        user_id = owned.user.user_id,
        role = %owned.user.role,
        note_id,
        "Note updated"
    );

    Ok(Json(NoteResponse { notes: note }))
}

/// DELETE /api/notes/deleteNotes/{id}
pub async fn delete_notes(
    owned: OwnedNote,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let note_id = owned.note.id;
    state.notes.delete_note(note_id).await?;

    tracing::info!(
        user_id = owned.user.user_id,
        role = %owned.user.role,
        note_id,
        "Note deleted"
    );

    Ok(Json(json!({ "message": "Deleted" })))
}
