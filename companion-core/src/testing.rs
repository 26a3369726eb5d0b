//! Testing utilities.
//!
//! This module provides tools for integration testing:
//! - sample sheets with realistic numbers
//! - `TestHarness`, an in-memory store and identity provider pair for
//!   scripted multi-user scenarios
//! - `SlowStore`, an in-memory store with injected latency

use crate::id::{CharacterId, UserId};
use crate::identity::{Credentials, LocalIdentityProvider};
use crate::reducer::add_entry;
use crate::session::{AppSession, SessionError};
use crate::store::{DocumentStore, MemoryStore, StoreError};
use crate::world::{
    Ability, AbilityScores, ActionKind, Character, EntryKind, HitPoints, NewEntry, Role, Skill,
    SlotInfo, UserProfile,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Password every harness account uses.
pub const TEST_PASSWORD: &str = "hunter22";

/// A level 3 fighter with no spellcasting.
pub fn create_sample_fighter(name: &str) -> Character {
    let mut character = Character::new_for(CharacterId::new(), name, Role::Player);
    character.level = 3;
    character.ability_scores = AbilityScores::new(16, 14, 15, 10, 12, 8);
    character.hit_points = HitPoints::new(28);
    character.armor_class = 18;
    character.initiative = 2;
    character.skill_profs.insert(Skill::Athletics, true);
    character.skill_profs.insert(Skill::Intimidation, true);
    character.saving_throw_profs.insert(Ability::Strength, true);
    character.saving_throw_profs.insert(Ability::Constitution, true);
    character.inventory = vec!["Longsword".to_string(), "Shield".to_string()];
    add_entry(
        &character,
        EntryKind::Ability,
        NewEntry::new("Second Wind", ActionKind::BonusAction)
            .with_description("Regain 1d10 + level hit points."),
    )
}

/// A level 5 wizard with slots through level 3, Fire Bolt and Fireball.
pub fn create_sample_caster(name: &str) -> Character {
    let mut character = Character::new_for(CharacterId::new(), name, Role::Player);
    character.class = "Wizard".to_string();
    character.race = "Elf".to_string();
    character.level = 5;
    character.ability_scores = AbilityScores::new(8, 14, 12, 16, 13, 10);
    character.hit_points = HitPoints::new(27);
    character.armor_class = 12;
    character.initiative = 2;
    character.spellcasting_ability = Ability::Intelligence;
    character.skill_profs.insert(Skill::Arcana, true);
    character.saving_throw_profs.insert(Ability::Intelligence, true);
    character.saving_throw_profs.insert(Ability::Wisdom, true);
    for (level, total) in [(1, 4), (2, 3), (3, 2)] {
        if let Some(slot) = character.spell_slots.get_mut(level) {
            *slot = SlotInfo { total, used: 0 };
        }
    }

    let character = add_entry(
        &character,
        EntryKind::Spell,
        NewEntry::new("Fire Bolt", ActionKind::Action).with_spell_level(0),
    );
    add_entry(
        &character,
        EntryKind::Spell,
        NewEntry::new("Fireball", ActionKind::Action)
            .with_description("8d6 fire damage in a 20-foot radius.")
            .with_spell_level(3),
    )
}

/// In-memory backends shared by every session a test opens.
#[derive(Clone, Default)]
pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub identity: Arc<LocalIdentityProvider>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account with [`TEST_PASSWORD`] and open its session.
    pub async fn register(
        &self,
        email: &str,
        display_name: &str,
        role: Role,
    ) -> Result<AppSession, SessionError> {
        let credentials = Credentials::new(email, TEST_PASSWORD).with_display_name(display_name);
        AppSession::register(
            self.store.clone(),
            self.identity.clone(),
            &credentials,
            role,
        )
        .await
    }

    pub async fn sign_in(&self, email: &str) -> Result<AppSession, SessionError> {
        let credentials = Credentials::new(email, TEST_PASSWORD);
        AppSession::sign_in(self.store.clone(), self.identity.clone(), &credentials).await
    }

    /// Write a sample fighter straight to the store, bypassing any session.
    pub async fn add_character(&self, name: &str) -> Character {
        let character = create_sample_fighter(name);
        // MemoryStore never fails
        let _ = self.store.put_character(character.id, &character).await;
        character
    }

    pub async fn stored(&self, id: CharacterId) -> Option<Character> {
        self.store.get_character(id).await.ok().flatten()
    }
}

/// A [`MemoryStore`] whose writes and listings can be made slow.
#[derive(Debug, Default)]
pub struct SlowStore {
    inner: MemoryStore,
    next_write_delay: Mutex<Option<Duration>>,
    list_delay: Duration,
}

impl SlowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `list_characters` call sleeps for `delay` first.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    /// The next `put_character` call sleeps for `delay` first.
    pub async fn delay_next_write(&self, delay: Duration) {
        *self.next_write_delay.lock().await = Some(delay);
    }
}

#[async_trait]
impl DocumentStore for SlowStore {
    async fn put_character(
        &self,
        id: CharacterId,
        character: &Character,
    ) -> Result<(), StoreError> {
        let delay = self.next_write_delay.lock().await.take();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.put_character(id, character).await
    }

    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        self.inner.get_character(id).await
    }

    async fn list_characters(&self) -> Result<Vec<Character>, StoreError> {
        if !self.list_delay.is_zero() {
            tokio::time::sleep(self.list_delay).await;
        }
        self.inner.list_characters().await
    }

    async fn put_user_profile(&self, id: UserId, profile: &UserProfile) -> Result<(), StoreError> {
        self.inner.put_user_profile(id, profile).await
    }

    async fn get_user_profile(&self, id: UserId) -> Result<Option<UserProfile>, StoreError> {
        self.inner.get_user_profile(id).await
    }
}
