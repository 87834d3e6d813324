//! Domain types, errors, and pure validation logic for the iNotebook service.
//!
//! Nothing in this crate performs I/O. Persistence lives in `inotebook-db`
//! and the HTTP surface in `inotebook-api`.

pub mod error;
pub mod notes;
pub mod roles;
pub mod signup;
pub mod types;
pub mod validation;
