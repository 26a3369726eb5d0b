//! JSON directory store.
//!
//! One pretty-printed JSON document per key, wrapped in a versioned
//! envelope:
//!
//! ```text
//! <root>/characters/<character id>.json
//! <root>/users/<user id>.json
//! <root>/accounts.json
//! ```
//!
//! The account book belongs to [`crate::LocalIdentityProvider`]; the store
//! only names its path.

use crate::id::{CharacterId, UserId};
use crate::store::{DocumentStore, StoreError};
use crate::world::{Character, UserProfile};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

/// Current document format version.
const DOCUMENT_VERSION: u32 = 1;

const CHARACTERS_DIR: &str = "characters";
const USERS_DIR: &str = "users";
const ACCOUNTS_FILE: &str = "accounts.json";
const TEMP_EXTENSION: &str = "tmp";

/// A stored document with its format version and save time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub document: T,
}

impl<T> Envelope<T> {
    pub fn new(document: T) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            saved_at: Utc::now(),
            document,
        }
    }
}

/// Write `document` to `path` in its envelope.
///
/// The content goes to a uniquely named sibling file that is then renamed
/// over `path`, so readers see either the old document or the new one.
pub(crate) async fn write_document<T: Serialize>(
    path: &Path,
    document: &T,
) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(&Envelope::new(document))?;

    let temp = temp_path(path);
    fs::write(&temp, content).await?;
    if let Err(e) = fs::rename(&temp, path).await {
        let _ = fs::remove_file(&temp).await;
        return Err(e.into());
    }
    debug!(path = %path.display(), "Wrote document");
    Ok(())
}

/// `<dir>/.<file name>.<uuid>.tmp`. The extension keeps it out of listings.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.{TEMP_EXTENSION}", Uuid::new_v4()))
}

pub(crate) async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let saved: Envelope<T> = serde_json::from_str(&content)?;

    if saved.version != DOCUMENT_VERSION {
        return Err(StoreError::VersionMismatch {
            expected: DOCUMENT_VERSION,
            found: saved.version,
        });
    }

    Ok(Some(saved.document))
}

/// Store backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn character_path(&self, id: CharacterId) -> PathBuf {
        self.root.join(CHARACTERS_DIR).join(format!("{id}.json"))
    }

    pub fn profile_path(&self, id: UserId) -> PathBuf {
        self.root.join(USERS_DIR).join(format!("{id}.json"))
    }

    /// Where a file-backed identity provider for this directory keeps its accounts.
    pub fn accounts_path(&self) -> PathBuf {
        self.root.join(ACCOUNTS_FILE)
    }
}

#[async_trait]
impl DocumentStore for JsonDirStore {
    async fn put_character(
        &self,
        id: CharacterId,
        character: &Character,
    ) -> Result<(), StoreError> {
        write_document(&self.character_path(id), character).await
    }

    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        read_document(&self.character_path(id)).await
    }

    /// Skips documents that fail to load. Creates the directory if it
    /// doesn't exist yet.
    async fn list_characters(&self) -> Result<Vec<Character>, StoreError> {
        let mut roster = Vec::new();

        let dir = self.root.join(CHARACTERS_DIR);
        if !dir.exists() {
            fs::create_dir_all(&dir).await?;
            return Ok(roster);
        }

        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            match read_document::<Character>(&path).await {
                Ok(Some(character)) => roster.push(character),
                Ok(None) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable character"),
            }
        }

        roster.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roster)
    }

    async fn put_user_profile(&self, id: UserId, profile: &UserProfile) -> Result<(), StoreError> {
        write_document(&self.profile_path(id), profile).await
    }

    async fn get_user_profile(&self, id: UserId) -> Result<Option<UserProfile>, StoreError> {
        read_document(&self.profile_path(id)).await
    }
}
