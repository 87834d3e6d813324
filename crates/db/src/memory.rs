//! In-process implementation of the store traits.
//!
//! Backs the HTTP integration tests and local runs without PostgreSQL.
//! Mirrors the SQL schema's guarantees: ids are assigned sequentially,
//! `users.email` is unique ignoring case, and ledger token hashes are
//! unique.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use inotebook_core::notes::{NoteDraft, NotePatch};
use inotebook_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::live_token::{CreateLiveToken, LiveToken};
use crate::models::note::Note;
use crate::models::user::{CreateUser, User};
use crate::repositories::user_repo::UQ_USERS_EMAIL;
use crate::store::{LiveTokenStore, NoteStore, UserStore};

const UQ_LIVE_TOKENS_TOKEN_HASH: &str = "uq_live_tokens_token_hash";

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: BTreeMap<DbId, User>,
    live_tokens: BTreeMap<String, LiveToken>,
    notes: BTreeMap<DbId, Note>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory store. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    fail_ledger_inserts: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent ledger insert fail with [`StoreError::Backend`].
    pub fn fail_ledger_inserts(&self, fail: bool) {
        self.fail_ledger_inserts.store(fail, Ordering::SeqCst);
    }

    /// Total notes across all owners.
    pub async fn note_count(&self) -> usize {
        self.tables.read().await.notes.len()
    }

    /// Total ledger rows across all users.
    pub async fn live_token_count(&self) -> usize {
        self.tables.read().await.live_tokens.len()
    }

    /// Ledger rows held for one user.
    pub async fn live_token_count_for_user(&self, user_id: DbId) -> usize {
        self.tables
            .read()
            .await
            .live_tokens
            .values()
            .filter(|row| row.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .values()
            .any(|u| u.email.to_lowercase() == input.email.to_lowercase());
        if taken {
            return Err(StoreError::UniqueViolation(UQ_USERS_EMAIL.to_owned()));
        }
        let user = User {
            id: tables.next_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }
}

#[async_trait]
impl LiveTokenStore for MemoryStore {
    async fn insert_live_token(&self, input: &CreateLiveToken) -> Result<LiveToken, StoreError> {
        if self.fail_ledger_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("ledger unavailable".into()));
        }
        let mut tables = self.tables.write().await;
        if tables.live_tokens.contains_key(&input.token_hash) {
            return Err(StoreError::UniqueViolation(
                UQ_LIVE_TOKENS_TOKEN_HASH.to_owned(),
            ));
        }
        let row = LiveToken {
            id: tables.next_id(),
            user_id: input.user_id,
            token_hash: input.token_hash.clone(),
            expires_at: input.expires_at,
            created_at: Utc::now(),
        };
        tables.live_tokens.insert(row.token_hash.clone(), row.clone());
        Ok(row)
    }

    async fn live_token_exists(&self, token_hash: &str) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.live_tokens.contains_key(token_hash))
    }

    async fn delete_live_token(&self, token_hash: &str) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .write()
            .await
            .live_tokens
            .remove(token_hash)
            .is_some())
    }

    async fn purge_expired_live_tokens(&self) -> Result<u64, StoreError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        let before = tables.live_tokens.len();
        tables.live_tokens.retain(|_, row| row.expires_at >= now);
        Ok((before - tables.live_tokens.len()) as u64)
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(&self, user_id: DbId, draft: &NoteDraft) -> Result<Note, StoreError> {
        let mut tables = self.tables.write().await;
        let note = Note {
            id: tables.next_id(),
            user_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            tag: draft.tag.clone(),
            created_at: Utc::now(),
        };
        tables.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn find_note(&self, id: DbId) -> Result<Option<Note>, StoreError> {
        Ok(self.tables.read().await.notes.get(&id).cloned())
    }

    async fn list_notes_by_owner(&self, user_id: DbId) -> Result<Vec<Note>, StoreError> {
        let tables = self.tables.read().await;
        let mut notes: Vec<Note> = tables
            .notes
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }

    async fn update_note(&self, id: DbId, patch: &NotePatch) -> Result<Option<Note>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(note) = tables.notes.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            note.title = title.clone();
        }
        if let Some(description) = &patch.description {
            note.description = description.clone();
        }
        if let Some(tag) = &patch.tag {
            note.tag = tag.clone();
        }
        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.notes.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            name: "ann".into(),
            email: email.into(),
            password_hash: "$argon2id$placeholder".into(),
        }
    }

    fn draft(title: &str) -> NoteDraft {
        NoteDraft {
            title: title.into(),
            description: "some text".into(),
            tag: vec!["alpha".into(), "beta".into()],
        }
    }

    #[tokio::test]
    async fn duplicate_email_rejected_ignoring_case() {
        let store = MemoryStore::new();
        store.create_user(&new_user("ann@x.com")).await.unwrap();
        let err = store.create_user(&new_user("ANN@x.com")).await.unwrap_err();
        assert!(err.is_unique_violation(UQ_USERS_EMAIL));
    }

    #[tokio::test]
    async fn ledger_membership_follows_insert_and_delete() {
        let store = MemoryStore::new();
        let row = CreateLiveToken {
            user_id: 1,
            token_hash: "abc".into(),
            expires_at: Utc::now() + chrono::Duration::days(1),
        };
        store.insert_live_token(&row).await.unwrap();
        assert!(store.live_token_exists("abc").await.unwrap());

        assert!(store.delete_live_token("abc").await.unwrap());
        assert!(!store.live_token_exists("abc").await.unwrap());
        assert!(
            !store.delete_live_token("abc").await.unwrap(),
            "deleting an absent row is a no-op"
        );
    }

    #[tokio::test]
    async fn purge_removes_only_expired_rows() {
        let store = MemoryStore::new();
        for (hash, offset) in [("old", -1), ("new", 1)] {
            store
                .insert_live_token(&CreateLiveToken {
                    user_id: 7,
                    token_hash: hash.into(),
                    expires_at: Utc::now() + chrono::Duration::hours(offset),
                })
                .await
                .unwrap();
        }
        assert_eq!(store.purge_expired_live_tokens().await.unwrap(), 1);
        assert!(store.live_token_exists("new").await.unwrap());
        assert_eq!(store.live_token_count_for_user(7).await, 1);
    }

    #[tokio::test]
    async fn injected_ledger_failure_surfaces_as_backend_error() {
        let store = MemoryStore::new();
        store.fail_ledger_inserts(true);
        let result = store
            .insert_live_token(&CreateLiveToken {
                user_id: 1,
                token_hash: "x".into(),
                expires_at: Utc::now(),
            })
            .await;
        assert_matches!(result, Err(StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn update_keeps_absent_fields_and_owner() {
        let store = MemoryStore::new();
        let note = store.create_note(3, &draft("First")).await.unwrap();
        let patch = NotePatch {
            title: Some("Second".into()),
            ..NotePatch::default()
        };
        let updated = store.update_note(note.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.title, "Second");
        assert_eq!(updated.description, note.description);
        assert_eq!(updated.tag, note.tag);
        assert_eq!(updated.user_id, 3);
    }

    #[tokio::test]
    async fn list_filters_by_owner() {
        let store = MemoryStore::new();
        store.create_note(1, &draft("mine")).await.unwrap();
        store.create_note(2, &draft("theirs")).await.unwrap();
        store.create_note(1, &draft("mine too")).await.unwrap();

        let mine = store.list_notes_by_owner(1).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|n| n.user_id == 1));
        assert_eq!(mine[0].title, "mine too", "newest first");
    }
}
