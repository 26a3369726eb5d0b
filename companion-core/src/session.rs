//! AppSession - the signed-in application state.
//!
//! A session is created by signing in, registering or resuming a remembered
//! identity, and ends at sign-out. It owns:
//! - the identity and its profile
//! - a local cache of character sheets, authoritative until the next refresh
//! - the roster shown by the combat and game master views
//! - the active view, the game master's inspection target and any pending
//!   reactivation prompt
//!
//! Every sheet edit goes through [`AppSession::apply`], whatever the target.
//! The cache is updated first and the new snapshot is queued on the
//! session's [`SnapshotWriter`], which writes snapshots in edit order. When a
//! player and the game master write the same sheet close together, whichever
//! write lands last wins.
//!
//! Refreshing is split so the store read can run without holding the
//! session: [`AppSession::refresh_request`] captures what to read,
//! [`RefreshRequest::load`] reads it, and [`AppSession::apply_refresh`]
//! swaps the result in unless the sheet was edited in the meantime.

use crate::combat::{self, ReactivationPrompt, UsePrompt};
use crate::id::{CharacterId, EntryId, UserId};
use crate::identity::{AuthMode, Credentials, IdentityError, IdentityProvider, ValidationError};
use crate::reducer::{self, SheetAction, Transition, UseError};
use crate::store::{DocumentStore, StoreError};
use crate::world::{Character, EntryKind, Role, UserProfile};
use crate::writer::SnapshotWriter;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Errors from AppSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Use(#[from] UseError),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Only the game master can do that")]
    NotPermitted,

    #[error("No character with id {0}")]
    UnknownCharacter(CharacterId),

    #[error("No profile for user {0}")]
    ProfileMissing(UserId),
}

impl SessionError {
    /// Text suitable for showing inline to the user.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Identity(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// The screen a session is showing. Decides what a refresh reloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Sheet,
    Combat,
    Dm,
}

impl std::str::FromStr for View {
    type Err = crate::world::ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sheet" => Ok(View::Sheet),
            "combat" => Ok(View::Combat),
            "dm" => Ok(View::Dm),
            _ => Err(crate::world::ParseNameError {
                kind: "view",
                value: s.to_string(),
            }),
        }
    }
}

/// Result of [`AppSession::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// The sheet changed; this is the new snapshot.
    Updated(Character),
    /// Nothing changed yet; the prompt is now pending.
    NeedsConfirmation(ReactivationPrompt),
}

/// A session shared between the command loop and the refresh task.
pub type SharedSession = Arc<Mutex<AppSession>>;

/// The signed-in application state.
pub struct AppSession {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
    user: UserId,
    profile: UserProfile,
    characters: HashMap<CharacterId, Character>,
    roster: Vec<Character>,
    view: View,
    inspecting: Option<CharacterId>,
    pending: Option<ReactivationPrompt>,
    writer: SnapshotWriter,
    /// Bumped on every committed edit.
    edits: u64,
}

impl AppSession {
    /// Create an account, write its profile and a fresh sheet keyed by the
    /// new identity, and start a session for it.
    pub async fn register(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        credentials: &Credentials,
        role: Role,
    ) -> Result<Self, SessionError> {
        credentials.validate(AuthMode::Register)?;
        let user = identity
            .register(credentials.email.trim(), &credentials.password)
            .await?;

        let display_name = credentials.display_name.trim().to_string();
        let profile = UserProfile {
            role,
            display_name: display_name.clone(),
            email: credentials.email.trim().to_string(),
        };
        store.put_user_profile(user, &profile).await?;

        let character = Character::new_for(CharacterId::from(user), display_name, role);
        store.put_character(character.id, &character).await?;

        info!(user = %user, role = %role, "Registered");
        Ok(Self::start(store, identity, user, profile, character))
    }

    pub async fn sign_in(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        credentials: &Credentials,
    ) -> Result<Self, SessionError> {
        credentials.validate(AuthMode::SignIn)?;
        let user = identity
            .sign_in(credentials.email.trim(), &credentials.password)
            .await?;
        let session = Self::load(store, identity, user).await?;
        info!(user = %user, "Signed in");
        Ok(session)
    }

    /// Pick up whoever the identity provider already has signed in.
    /// Returns `None` when nobody is.
    pub async fn resume(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Option<Self>, SessionError> {
        let current = *identity.subscribe().borrow_and_update();
        match current {
            Some(user) => {
                let session = Self::load(store, identity, user).await?;
                info!(user = %user, "Resumed session");
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn load(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        user: UserId,
    ) -> Result<Self, SessionError> {
        let profile = store
            .get_user_profile(user)
            .await?
            .ok_or(SessionError::ProfileMissing(user))?;

        let id = CharacterId::from(user);
        let character = match store.get_character(id).await? {
            Some(character) => character,
            None => {
                let character = Character::new_for(id, profile.display_name.clone(), profile.role);
                store.put_character(id, &character).await?;
                character
            }
        };

        Ok(Self::start(store, identity, user, profile, character))
    }

    fn start(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        user: UserId,
        profile: UserProfile,
        character: Character,
    ) -> Self {
        let mut characters = HashMap::new();
        characters.insert(character.id, character);
        let writer = SnapshotWriter::spawn(Arc::clone(&store));
        Self {
            store,
            identity,
            user,
            profile,
            characters,
            roster: Vec::new(),
            view: View::default(),
            inspecting: None,
            pending: None,
            writer,
            edits: 0,
        }
    }

    /// Wait for pending writes, then sign out of the identity provider.
    pub async fn sign_out(mut self) -> Result<(), SessionError> {
        self.flush().await;
        self.identity.sign_out().await?;
        info!(user = %self.user, "Signed out");
        Ok(())
    }

    // ========================================================================
    // State Accessors
    // ========================================================================

    pub fn user_id(&self) -> UserId {
        self.user
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn is_dm(&self) -> bool {
        self.profile.role == Role::Dm
    }

    pub fn own_character_id(&self) -> CharacterId {
        CharacterId::from(self.user)
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn own_character(&self) -> Option<&Character> {
        self.character(self.own_character_id())
    }

    /// The sheet edits apply to by default: the inspected sheet for a game
    /// master, otherwise the user's own.
    pub fn target(&self) -> CharacterId {
        self.inspecting.unwrap_or_else(|| self.own_character_id())
    }

    pub fn target_character(&self) -> Option<&Character> {
        self.character(self.target())
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn inspecting(&self) -> Option<CharacterId> {
        self.inspecting
    }

    pub fn roster(&self) -> &[Character] {
        &self.roster
    }

    pub fn combat_order(&self) -> Vec<Character> {
        combat::combat_order(&self.roster)
    }

    pub fn dm_roster(&self) -> Vec<Character> {
        combat::dm_roster(&self.roster)
    }

    pub fn pending_reactivation(&self) -> Option<ReactivationPrompt> {
        self.pending
    }

    // ========================================================================
    // Editing
    // ========================================================================

    fn check_write(&self, target: CharacterId) -> Result<(), SessionError> {
        if self.is_dm() || target == self.own_character_id() {
            Ok(())
        } else {
            Err(SessionError::NotPermitted)
        }
    }

    async fn fetch(&mut self, id: CharacterId) -> Result<Character, SessionError> {
        if let Some(character) = self.characters.get(&id) {
            return Ok(character.clone());
        }
        let character = self
            .store
            .get_character(id)
            .await?
            .ok_or(SessionError::UnknownCharacter(id))?;
        self.characters.insert(id, character.clone());
        Ok(character)
    }

    /// Apply one edit to a sheet.
    ///
    /// Players may only edit their own sheet; the game master may edit any.
    /// The cache changes immediately and the write happens in the background.
    /// Toggling an action that is already consumed changes nothing and leaves
    /// a reactivation prompt pending instead.
    pub async fn apply(
        &mut self,
        target: CharacterId,
        action: SheetAction,
    ) -> Result<Applied, SessionError> {
        self.check_write(target)?;
        let current = self.fetch(target).await?;

        match reducer::reduce(&current, &action)? {
            Transition::Updated(next) => {
                self.commit(next.clone());
                Ok(Applied::Updated(next))
            }
            Transition::ConfirmReactivation(kind) => {
                let prompt = ReactivationPrompt {
                    target,
                    action: kind,
                };
                self.pending = Some(prompt);
                Ok(Applied::NeedsConfirmation(prompt))
            }
        }
    }

    /// Flip the pending action back to available. Returns `false` when no
    /// prompt was pending.
    pub async fn confirm_reactivation(&mut self) -> Result<bool, SessionError> {
        let Some(prompt) = self.pending.take() else {
            return Ok(false);
        };
        self.apply(prompt.target, SheetAction::ConfirmReactivation(prompt.action))
            .await?;
        Ok(true)
    }

    /// Drop the pending prompt, leaving the action consumed.
    pub fn dismiss_reactivation(&mut self) -> Option<ReactivationPrompt> {
        self.pending.take()
    }

    /// What the use prompt should show for an entry on a sheet.
    pub async fn use_prompt(
        &mut self,
        target: CharacterId,
        kind: EntryKind,
        id: EntryId,
    ) -> Result<UsePrompt, SessionError> {
        let character = self.fetch(target).await?;
        let entry = character
            .find_entry(kind, id)
            .ok_or(UseError::UnknownEntry { kind, id })?;
        Ok(UsePrompt::new(&character, entry))
    }

    fn commit(&mut self, character: Character) {
        if let Some(slot) = self.roster.iter_mut().find(|c| c.id == character.id) {
            *slot = character.clone();
        }
        self.characters.insert(character.id, character.clone());
        self.edits += 1;
        self.writer.write(character);
    }

    /// Wait for every write queued so far.
    pub async fn flush(&mut self) {
        self.writer.flush().await;
    }

    // ========================================================================
    // Game Master
    // ========================================================================

    /// Create an NPC sheet under a fresh id.
    pub async fn create_npc(&mut self, name: &str) -> Result<Character, SessionError> {
        if !self.is_dm() {
            return Err(SessionError::NotPermitted);
        }
        let id = CharacterId::new();
        let npc = Character::new_for(id, name.trim(), Role::Player);
        self.store.put_character(id, &npc).await?;
        self.characters.insert(id, npc.clone());
        self.roster.push(npc.clone());
        info!(character = %id, name = %npc.name, "Created NPC");
        Ok(npc)
    }

    /// Select a sheet for the game master to view and edit.
    pub async fn inspect(&mut self, id: CharacterId) -> Result<&Character, SessionError> {
        if !self.is_dm() {
            return Err(SessionError::NotPermitted);
        }
        self.writer.flush().await;
        let character = match self.store.get_character(id).await? {
            Some(character) => character,
            None => self
                .characters
                .get(&id)
                .cloned()
                .ok_or(SessionError::UnknownCharacter(id))?,
        };
        self.characters.insert(id, character);
        self.inspecting = Some(id);
        self.view = View::Sheet;
        self.characters
            .get(&id)
            .ok_or(SessionError::UnknownCharacter(id))
    }

    /// Stop inspecting and return to the roster.
    pub fn back(&mut self) {
        if self.inspecting.take().is_some() {
            self.view = View::Dm;
        }
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    /// Reload the roster, whatever the view.
    pub async fn refresh_roster(&mut self) -> Result<(), SessionError> {
        let refreshed = self.request(RefreshScope::Roster).load().await?;
        self.apply_refresh(refreshed);
        Ok(())
    }

    /// Reload what the active view shows from the store.
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        let refreshed = self.refresh_request().load().await?;
        self.apply_refresh(refreshed);
        Ok(())
    }

    /// What a refresh of the active view should read.
    ///
    /// The combat and game master views reload the roster. The sheet view
    /// reloads the sheet being edited.
    pub fn refresh_request(&self) -> RefreshRequest {
        match self.view {
            View::Combat | View::Dm => self.request(RefreshScope::Roster),
            View::Sheet => self.request(RefreshScope::Sheet(self.target())),
        }
    }

    fn request(&self, scope: RefreshScope) -> RefreshRequest {
        RefreshRequest {
            store: Arc::clone(&self.store),
            writer: self.writer.clone(),
            scope,
            edits: self.edits,
        }
    }

    /// Swap loaded data into the cache. Stored data replaces cached sheets
    /// unconditionally, unless an edit was committed after the request was
    /// taken; then the result is dropped and `false` returned.
    pub fn apply_refresh(&mut self, refreshed: Refreshed) -> bool {
        if refreshed.edits != self.edits {
            debug!("Dropped refresh overtaken by a local edit");
            return false;
        }
        match refreshed.data {
            RefreshData::Roster(roster) => {
                for character in &roster {
                    self.characters.insert(character.id, character.clone());
                }
                debug!(count = roster.len(), "Refreshed roster");
                self.roster = roster;
            }
            RefreshData::Sheet(id, Some(character)) => {
                self.characters.insert(id, character);
                debug!(character = %id, "Refreshed sheet");
            }
            RefreshData::Sheet(_, None) => {}
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshScope {
    Roster,
    Sheet(CharacterId),
}

/// A pending store read, detached from the session that asked for it.
pub struct RefreshRequest {
    store: Arc<dyn DocumentStore>,
    writer: SnapshotWriter,
    scope: RefreshScope,
    edits: u64,
}

impl RefreshRequest {
    /// Read from the store. Waits for the session's queued writes first, so
    /// the read never returns a copy older than the session's own edits.
    pub async fn load(self) -> Result<Refreshed, SessionError> {
        self.writer.flush().await;
        let data = match self.scope {
            RefreshScope::Roster => RefreshData::Roster(self.store.list_characters().await?),
            RefreshScope::Sheet(id) => RefreshData::Sheet(id, self.store.get_character(id).await?),
        };
        Ok(Refreshed {
            edits: self.edits,
            data,
        })
    }
}

/// Data read by [`RefreshRequest::load`], ready for [`AppSession::apply_refresh`].
#[derive(Debug, Clone)]
pub struct Refreshed {
    edits: u64,
    data: RefreshData,
}

#[derive(Debug, Clone)]
enum RefreshData {
    Roster(Vec<Character>),
    Sheet(CharacterId, Option<Character>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::LocalIdentityProvider;
    use crate::reducer::HpChange;
    use crate::store::MemoryStore;
    use crate::testing::SlowStore;
    use crate::world::ActionKind;
    use std::time::Duration;

    fn backends() -> (Arc<MemoryStore>, Arc<LocalIdentityProvider>) {
        (
            Arc::new(MemoryStore::new()),
            Arc::new(LocalIdentityProvider::new()),
        )
    }

    async fn register(
        store: &Arc<MemoryStore>,
        identity: &Arc<LocalIdentityProvider>,
        email: &str,
        name: &str,
        role: Role,
    ) -> AppSession {
        let credentials = Credentials::new(email, "hunter22").with_display_name(name);
        AppSession::register(store.clone(), identity.clone(), &credentials, role)
            .await
            .expect("Registration should succeed")
    }

    #[tokio::test]
    async fn test_register_writes_profile_and_sheet() {
        let (store, identity) = backends();
        let session = register(&store, &identity, "aria@example.com", "Aria", Role::Player).await;

        let id = session.own_character_id();
        assert_eq!(id.owner(), session.user_id());
        let stored = store.get_character(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Aria");
        let profile = store.get_user_profile(session.user_id()).await.unwrap();
        assert_eq!(profile.unwrap().display_name, "Aria");
    }

    #[tokio::test]
    async fn test_register_validates_first() {
        let (store, identity) = backends();
        let credentials = Credentials::new("aria@example.com", "hunter22");
        let result = AppSession::register(store, identity.clone(), &credentials, Role::Player).await;
        assert!(matches!(
            result,
            Err(SessionError::Validation(ValidationError::MissingDisplayName))
        ));
        assert_eq!(identity.current(), None);
    }

    #[tokio::test]
    async fn test_sign_in_errors_have_user_messages() {
        let (store, identity) = backends();
        let credentials = Credentials::new("ghost@example.com", "hunter22");
        let err = match AppSession::sign_in(store, identity, &credentials).await {
            Err(e) => e,
            Ok(_) => panic!("Sign in should fail"),
        };
        assert_eq!(err.user_message(), "No account exists for that email.");
    }

    #[tokio::test]
    async fn test_apply_updates_cache_and_store() {
        let (store, identity) = backends();
        let mut session = register(&store, &identity, "aria@example.com", "Aria", Role::Player).await;
        let id = session.own_character_id();

        let applied = session
            .apply(
                id,
                SheetAction::ChangeHp {
                    change: HpChange::Damage,
                    amount: 3,
                },
            )
            .await
            .unwrap();
        assert!(matches!(applied, Applied::Updated(ref c) if c.hit_points.current == 7));
        assert_eq!(session.own_character().unwrap().hit_points.current, 7);

        session.flush().await;
        let stored = store.get_character(id).await.unwrap().unwrap();
        assert_eq!(stored.hit_points.current, 7);
    }

    #[tokio::test]
    async fn test_player_cannot_edit_others() {
        let (store, identity) = backends();
        let other = register(&store, &identity, "bob@example.com", "Bob", Role::Player).await;
        let other_id = other.own_character_id();
        let mut session = register(&store, &identity, "aria@example.com", "Aria", Role::Player).await;

        let result = session.apply(other_id, SheetAction::ResetTurn).await;
        assert!(matches!(result, Err(SessionError::NotPermitted)));
        assert!(matches!(
            session.create_npc("Goblin").await,
            Err(SessionError::NotPermitted)
        ));
    }

    #[tokio::test]
    async fn test_reactivation_flow() {
        let (store, identity) = backends();
        let mut session = register(&store, &identity, "aria@example.com", "Aria", Role::Player).await;
        let id = session.own_character_id();
        let toggle = SheetAction::ToggleAction(ActionKind::Reaction);

        session.apply(id, toggle.clone()).await.unwrap();
        let applied = session.apply(id, toggle.clone()).await.unwrap();
        let prompt = ReactivationPrompt {
            target: id,
            action: ActionKind::Reaction,
        };
        assert_eq!(applied, Applied::NeedsConfirmation(prompt));
        assert_eq!(session.pending_reactivation(), Some(prompt));

        // Dismissing keeps the action consumed
        assert_eq!(session.dismiss_reactivation(), Some(prompt));
        assert!(session.own_character().unwrap().actions.reaction);
        assert!(!session.confirm_reactivation().await.unwrap());

        session.apply(id, toggle).await.unwrap();
        assert!(session.confirm_reactivation().await.unwrap());
        assert!(!session.own_character().unwrap().actions.reaction);
        assert_eq!(session.pending_reactivation(), None);
    }

    #[tokio::test]
    async fn test_dm_edits_npc_and_refreshes_roster() {
        let (store, identity) = backends();
        let _player = register(&store, &identity, "aria@example.com", "Aria", Role::Player).await;
        let mut dm = register(&store, &identity, "gm@example.com", "GM", Role::Dm).await;

        let npc = dm.create_npc("Goblin Boss").await.unwrap();
        dm.inspect(npc.id).await.unwrap();
        assert_eq!(dm.target(), npc.id);

        dm.apply(dm.target(), SheetAction::SetInitiative(15))
            .await
            .unwrap();
        dm.flush().await;

        dm.set_view(View::Dm);
        dm.refresh().await.unwrap();
        let names: Vec<_> = dm.dm_roster().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Aria", "Goblin Boss"]);
        assert_eq!(dm.combat_order()[0].name, "Goblin Boss");

        dm.back();
        assert_eq!(dm.target(), dm.own_character_id());
    }

    #[tokio::test]
    async fn test_refresh_takes_stored_snapshot() {
        let (store, identity) = backends();
        let mut session = register(&store, &identity, "aria@example.com", "Aria", Role::Player).await;
        let id = session.own_character_id();

        let mut remote = session.own_character().unwrap().clone();
        remote.notes = "written elsewhere".to_string();
        store.put_character(id, &remote).await.unwrap();

        session.refresh().await.unwrap();
        assert_eq!(session.own_character().unwrap().notes, "written elsewhere");
    }

    #[tokio::test(start_paused = true)]
    async fn test_own_edits_survive_a_slow_write() {
        let store = Arc::new(SlowStore::new());
        let identity = Arc::new(LocalIdentityProvider::new());
        let credentials = Credentials::new("aria@example.com", "hunter22").with_display_name("Aria");
        let mut session = AppSession::register(store.clone(), identity, &credentials, Role::Player)
            .await
            .expect("Registration should succeed");
        let id = session.own_character_id();

        store.delay_next_write(Duration::from_millis(200)).await;
        for amount in [3, 2] {
            session
                .apply(
                    id,
                    SheetAction::ChangeHp {
                        change: HpChange::Damage,
                        amount,
                    },
                )
                .await
                .unwrap();
        }

        // A poll straight after the edits must not pull back an older copy
        session.refresh().await.unwrap();
        assert_eq!(session.own_character().unwrap().hit_points.current, 5);
        let stored = store.get_character(id).await.unwrap().unwrap();
        assert_eq!(stored.hit_points.current, 5);
    }

    #[tokio::test]
    async fn test_refresh_overtaken_by_edit_is_dropped() {
        let (store, identity) = backends();
        let mut session = register(&store, &identity, "aria@example.com", "Aria", Role::Player).await;
        let id = session.own_character_id();

        let request = session.refresh_request();
        let refreshed = request.load().await.unwrap();
        session
            .apply(id, SheetAction::SetNotes("fresh".to_string()))
            .await
            .unwrap();

        assert!(!session.apply_refresh(refreshed));
        assert_eq!(session.own_character().unwrap().notes, "fresh");

        let refreshed = session.refresh_request().load().await.unwrap();
        assert!(session.apply_refresh(refreshed));
        assert_eq!(session.own_character().unwrap().notes, "fresh");
    }

    #[tokio::test]
    async fn test_resume_and_sign_out() {
        let (store, identity) = backends();
        let session = register(&store, &identity, "aria@example.com", "Aria", Role::Player).await;
        let user = session.user_id();

        let resumed = AppSession::resume(store.clone(), identity.clone())
            .await
            .unwrap()
            .expect("Identity should be remembered");
        assert_eq!(resumed.user_id(), user);

        resumed.sign_out().await.unwrap();
        assert!(AppSession::resume(store, identity).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_profile() {
        let (store, identity) = backends();
        identity.register("lost@example.com", "hunter22").await.unwrap();
        let credentials = Credentials::new("lost@example.com", "hunter22");
        let result = AppSession::sign_in(store, identity, &credentials).await;
        assert!(matches!(result, Err(SessionError::ProfileMissing(_))));
    }
}
