//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /createUser  -> create_user
/// POST /login       -> login
/// POST /getUser     -> get_user (requires access token)
/// POST /refresh     -> refresh (requires refresh cookie)
/// POST /logout      -> logout (requires refresh cookie)
/// POST /rememberme  -> remember_me (requires refresh cookie)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/createUser", post(auth::create_user))
        .route("/login", post(auth::login))
        .route("/getUser", post(auth::get_user))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/rememberme", post(auth::remember_me))
}
