//! Character sheet and combat tracker core for D&D 5e tables.
//!
//! This crate provides:
//! - The character sheet model and the derived numbers computed from it
//! - A single reducer every sheet edit goes through
//! - Document store and identity provider traits, with in-memory and
//!   JSON directory implementations
//! - An application session with background persistence and polling
//!
//! # Quick Start
//!
//! ```ignore
//! use companion_core::{AppSession, Credentials, JsonDirStore, LocalIdentityProvider, Role};
//! use companion_core::reducer::{HpChange, SheetAction};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(JsonDirStore::new("companion-data"));
//!     let identity = Arc::new(LocalIdentityProvider::new());
//!     let credentials = Credentials::new("aria@example.com", "hunter22")
//!         .with_display_name("Aria");
//!
//!     let mut session = AppSession::register(store, identity, &credentials, Role::Player).await?;
//!     let me = session.own_character_id();
//!     session
//!         .apply(me, SheetAction::ChangeHp { change: HpChange::Damage, amount: 4 })
//!         .await?;
//!
//!     session.sign_out().await?;
//!     Ok(())
//! }
//! ```

pub mod combat;
pub mod config;
pub mod id;
pub mod identity;
pub mod persist;
pub mod poll;
pub mod reducer;
pub mod rules;
pub mod session;
pub mod store;
pub mod testing;
pub mod world;
pub mod writer;

// Primary public API
pub use combat::{ReactivationPrompt, UsePrompt};
pub use config::{CompanionConfig, ConfigError};
pub use id::{CharacterId, EntryId, UserId};
pub use identity::{
    AuthMode, Credentials, IdentityCode, IdentityError, IdentityProvider, LocalIdentityProvider,
    ValidationError,
};
pub use persist::JsonDirStore;
pub use poll::{spawn_refresh, RefreshHandle, DEFAULT_POLL_INTERVAL};
pub use reducer::{reduce, SheetAction, Transition, UseError};
pub use rules::DerivedStats;
pub use session::{
    AppSession, Applied, RefreshRequest, Refreshed, SessionError, SharedSession, View,
};
pub use store::{DocumentStore, MemoryStore, StoreError};
pub use testing::TestHarness;
pub use world::{Ability, ActionKind, Character, Condition, EntryKind, Role, Skill, UserProfile};
pub use writer::SnapshotWriter;
