//! Document store the sheets and profiles live in.
//!
//! The store is keyed, whole-document storage: a put replaces everything at
//! the key, so concurrent writers resolve as last write wins.

use crate::id::{CharacterId, UserId};
use crate::world::{Character, UserProfile};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Keyed storage for character sheets and user profiles.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Replace the whole character document at `id`.
    async fn put_character(&self, id: CharacterId, character: &Character)
        -> Result<(), StoreError>;

    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, StoreError>;

    /// Every character in the store.
    async fn list_characters(&self) -> Result<Vec<Character>, StoreError>;

    async fn put_user_profile(&self, id: UserId, profile: &UserProfile)
        -> Result<(), StoreError>;

    async fn get_user_profile(&self, id: UserId) -> Result<Option<UserProfile>, StoreError>;
}

/// In-process store. Cloned handles are not shared; wrap it in an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    characters: RwLock<HashMap<CharacterId, Character>>,
    profiles: RwLock<HashMap<UserId, UserProfile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn put_character(
        &self,
        id: CharacterId,
        character: &Character,
    ) -> Result<(), StoreError> {
        self.characters.write().await.insert(id, character.clone());
        Ok(())
    }

    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        Ok(self.characters.read().await.get(&id).cloned())
    }

    async fn list_characters(&self) -> Result<Vec<Character>, StoreError> {
        let mut roster: Vec<_> = self.characters.read().await.values().cloned().collect();
        roster.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roster)
    }

    async fn put_user_profile(&self, id: UserId, profile: &UserProfile) -> Result<(), StoreError> {
        self.profiles.write().await.insert(id, profile.clone());
        Ok(())
    }

    async fn get_user_profile(&self, id: UserId) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }
}
