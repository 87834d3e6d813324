//! Route definitions for the `/notes` resource. All routes require an
//! access token.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/readNotes", get(notes::read_notes))
        .route("/readANote/{id}", get(notes::read_a_note))
        .route("/addNotes", post(notes::add_notes))
        .route("/updateNotes/{id}", put(notes::update_notes))
        .route("/deleteNotes/{id}", delete(notes::delete_notes))
}
