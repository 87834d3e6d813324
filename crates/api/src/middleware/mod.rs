//! Request guards, implemented as Axum extractors.
//!
//! A handler lists the guards it needs as parameters; Axum runs them in
//! parameter order and the first rejection short-circuits the request:
//!
//! - [`auth::AuthUser`] -- valid access token (auth check).
//! - [`refresh::RefreshSession`] -- refresh-token cookie present in the
//!   ledger and cryptographically valid (auth check).
//! - [`ownership::OwnedNote`] -- auth check, then the note exists and
//!   belongs to the caller (ownership check).
//! - [`json::JsonBody`] -- well-formed JSON body; field rules then run in
//!   the handler (validation check).

pub mod auth;
pub mod json;
pub mod ownership;
pub mod refresh;
