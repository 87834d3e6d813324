//! Note entity model.
//!
//! Create and update inputs are the validated
//! [`NoteDraft`](inotebook_core::notes::NoteDraft) and
//! [`NotePatch`](inotebook_core::notes::NotePatch).

use inotebook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notes` table. `user_id` is the owner and never changes.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Note {
    pub id: DbId,
    #[serde(rename = "user")]
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub tag: Vec<String>,
    #[serde(rename = "date")]
    pub created_at: Timestamp,
}
