pub mod auth;
pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/createUser                 signup (public)
/// /auth/login                      login (public)
/// /auth/getUser                    current user (access token)
/// /auth/refresh                    new access token (refresh cookie)
/// /auth/logout                     revoke refresh token (refresh cookie)
/// /auth/rememberme                 new token pair (refresh cookie)
///
/// /notes/readNotes                 list own notes
/// /notes/readANote/{id}            read (owner only)
/// /notes/addNotes                  create
/// /notes/updateNotes/{id}          update (owner only)
/// /notes/deleteNotes/{id}          delete (owner only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/notes", notes::router())
}
