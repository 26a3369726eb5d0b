//! Headless line protocol.
//!
//! Reads one command per line from stdin and prints tagged results:
//! - `[OK]`, `[STATUS]`, `[ROSTER]` and friends for results
//! - `[CONFIRM]` when a consumed action needs `#confirm` or `#dismiss`
//! - `[ERROR]` for anything refused
//!
//! Accounts are kept in the data directory next to the documents. An
//! identity still signed in when the driver last exited is resumed at
//! startup. While signed in, a background task refreshes the active view on
//! the configured interval.

use crate::command::{self, CharacterRef, Command, EntryRef};
use companion_core::combat::is_depleted;
use companion_core::rules::signed;
use companion_core::{
    spawn_refresh, AppSession, Applied, Character, CompanionConfig, Credentials, DerivedStats,
    DocumentStore, EntryId, EntryKind, IdentityProvider, JsonDirStore, LocalIdentityProvider,
    RefreshHandle, SessionError, SharedSession, SheetAction, StoreError,
};
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing::{info, warn};

struct Active {
    session: SharedSession,
    refresh: RefreshHandle,
}

/// Driver state: backends plus the signed-in session, if any.
pub struct Headless {
    config: CompanionConfig,
    store: Arc<dyn DocumentStore>,
    identity: Arc<LocalIdentityProvider>,
    active: Option<Active>,
}

impl Headless {
    /// Open the document directory and its account book.
    pub async fn open(config: CompanionConfig) -> Result<Self, StoreError> {
        let dir = JsonDirStore::new(&config.data_dir);
        let identity = LocalIdentityProvider::open(dir.accounts_path()).await?;
        let store: Arc<dyn DocumentStore> = Arc::new(dir);
        Ok(Self {
            config,
            store,
            identity: Arc::new(identity),
            active: None,
        })
    }

    /// Pick up the identity remembered from the last run, if any.
    pub async fn resume(&mut self) -> Result<(), SessionError> {
        let resumed = AppSession::resume(self.store.clone(), self.identity.clone()).await?;
        if let Some(session) = resumed {
            println!("[OK] Resumed as {}", session.profile().display_name);
            self.start(session);
        }
        Ok(())
    }

    fn start(&mut self, session: AppSession) {
        let session = Arc::new(Mutex::new(session));
        let refresh = spawn_refresh(session.clone(), self.config.poll_interval);
        self.active = Some(Active { session, refresh });
    }

    fn session(&self) -> Result<SharedSession, SessionError> {
        self.active
            .as_ref()
            .map(|a| a.session.clone())
            .ok_or(SessionError::NotSignedIn)
    }

    /// Run one command. Returns `false` when the driver should exit.
    pub async fn handle(&mut self, command: Command) -> Result<bool, SessionError> {
        match command {
            Command::Register {
                email,
                password,
                role,
                display_name,
            } => {
                self.sign_out_current().await?;
                let credentials = Credentials::new(email, password).with_display_name(display_name);
                let session = AppSession::register(
                    self.store.clone(),
                    self.identity.clone(),
                    &credentials,
                    role,
                )
                .await?;
                println!("[OK] Registered {} as {}", session.profile().display_name, role);
                self.start(session);
            }
            Command::Login { email, password } => {
                self.sign_out_current().await?;
                let credentials = Credentials::new(email, password);
                let session =
                    AppSession::sign_in(self.store.clone(), self.identity.clone(), &credentials)
                        .await?;
                println!("[OK] Signed in as {}", session.profile().display_name);
                self.start(session);
            }
            Command::Logout => {
                if self.active.is_none() {
                    return Err(SessionError::NotSignedIn);
                }
                self.sign_out_current().await?;
                println!("[OK] Signed out");
            }
            Command::Quit => {
                self.detach_current().await;
                println!("Goodbye!");
                return Ok(false);
            }
            Command::Help => {
                println!("[HELP]");
                println!("{}", command::HELP);
            }
            other => {
                let shared = self.session()?;
                let mut session = shared.lock().await;
                run_session_command(&mut session, other).await?;
            }
        }
        Ok(true)
    }

    /// Stop the active session without signing out, so the next run resumes it.
    async fn detach_current(&mut self) {
        if let Some(active) = self.active.take() {
            active.refresh.shutdown().await;
            active.session.lock().await.flush().await;
        }
    }

    async fn sign_out_current(&mut self) -> Result<(), SessionError> {
        let Some(active) = self.active.take() else {
            return Ok(());
        };
        active.refresh.shutdown().await;
        match Arc::try_unwrap(active.session) {
            Ok(mutex) => mutex.into_inner().sign_out().await,
            Err(shared) => {
                warn!("Session still shared at sign-out");
                shared.lock().await.flush().await;
                self.identity.sign_out().await?;
                Ok(())
            }
        }
    }
}

fn resolve_entry(character: &Character, kind: EntryKind, entry: EntryRef) -> Option<EntryId> {
    match entry {
        EntryRef::Id(id) => character.find_entry(kind, id).map(|e| e.id),
        EntryRef::Index(index) => character.entries(kind).get(index).map(|e| e.id),
    }
}

fn current_target(session: &AppSession) -> Result<&Character, SessionError> {
    session
        .target_character()
        .ok_or(SessionError::UnknownCharacter(session.target()))
}

async fn run_session_command(
    session: &mut AppSession,
    command: Command,
) -> Result<(), SessionError> {
    let target = session.target();
    match command {
        Command::Status => print_status(current_target(session)?),
        Command::Edit(action) => report(session.apply(target, action).await?),
        Command::RemoveEntry { kind, entry } => {
            let character = current_target(session)?;
            let Some(id) = resolve_entry(character, kind, entry) else {
                println!("[ERROR] No such {kind}");
                return Ok(());
            };
            report(session.apply(target, SheetAction::RemoveEntry { kind, id }).await?);
        }
        Command::Use { kind, entry, slot } => {
            let character = current_target(session)?;
            let Some(id) = resolve_entry(character, kind, entry) else {
                println!("[ERROR] No such {kind}");
                return Ok(());
            };
            let prompt = session.use_prompt(target, kind, id).await?;
            if prompt.action_already_used {
                println!("[WARN] {} already used this turn", prompt.action);
            }
            if !prompt.can_confirm(slot) {
                if prompt.candidate_slots.is_empty() {
                    println!("[ERROR] No spell slot of level {} or higher left", prompt.spell_level);
                } else {
                    println!("[SLOT] Choose a slot level: {:?}", prompt.candidate_slots);
                }
                return Ok(());
            }
            report(session.apply(target, SheetAction::Use { kind, id, slot }).await?);
        }
        Command::Confirm => {
            if session.confirm_reactivation().await? {
                println!("[OK] Action available again");
            } else {
                println!("[ERROR] Nothing to confirm");
            }
        }
        Command::Dismiss => match session.dismiss_reactivation() {
            Some(prompt) => println!("[OK] {} stays used", prompt.action),
            None => println!("[ERROR] Nothing to dismiss"),
        },
        Command::Roster => {
            if session.roster().is_empty() {
                session.refresh_roster().await?;
            }
            println!("[ROSTER]");
            let roster = if session.is_dm() {
                session.dm_roster()
            } else {
                session.roster().to_vec()
            };
            for (i, c) in roster.iter().enumerate() {
                println!(
                    "  {i}: {} ({} {} {}) HP {}/{} [{}]",
                    c.name, c.race, c.class, c.level, c.hit_points.current, c.hit_points.maximum, c.id
                );
            }
        }
        Command::Order => {
            session.refresh_roster().await?;
            println!("[ORDER]");
            for (i, c) in session.combat_order().iter().enumerate() {
                println!("  {}. {} ({})", i + 1, c.name, signed(c.initiative));
            }
        }
        Command::Inspect(reference) => {
            let id = match reference {
                CharacterRef::Id(id) => id,
                CharacterRef::Index(index) => {
                    let roster = session.dm_roster();
                    match roster.get(index) {
                        Some(c) => c.id,
                        None => {
                            println!("[ERROR] No roster entry {index}");
                            return Ok(());
                        }
                    }
                }
            };
            let character = session.inspect(id).await?;
            println!("[OK] Inspecting {}", character.name);
        }
        Command::Back => {
            session.back();
            println!("[OK] Back to roster");
        }
        Command::Npc(name) => {
            let npc = session.create_npc(&name).await?;
            println!("[OK] Created {} [{}]", npc.name, npc.id);
        }
        Command::View(view) => {
            session.set_view(view);
            session.refresh().await?;
            println!("[OK] Viewing {view:?}");
        }
        Command::Register { .. }
        | Command::Login { .. }
        | Command::Logout
        | Command::Help
        | Command::Quit => {}
    }
    Ok(())
}

fn report(applied: Applied) {
    match applied {
        Applied::Updated(character) => {
            println!(
                "[OK] {} HP {}/{} (+{} temp)",
                character.name,
                character.hit_points.current,
                character.hit_points.maximum,
                character.hit_points.temporary
            );
        }
        Applied::NeedsConfirmation(prompt) => {
            println!(
                "[CONFIRM] {} is already used. #confirm to make it available again, #dismiss to keep it used",
                prompt.action
            );
        }
    }
}

fn print_status(c: &Character) {
    let derived = DerivedStats::compute(c);
    println!("[STATUS]");
    println!("  {} - level {} {} {} ({})", c.name, c.level, c.race, c.class, c.role);
    println!(
        "  HP: {}/{} (+{} temp)  AC: {}  Speed: {}  Initiative: {}",
        c.hit_points.current,
        c.hit_points.maximum,
        c.hit_points.temporary,
        c.armor_class,
        c.speed,
        signed(c.initiative)
    );
    let scores: Vec<_> = derived
        .modifiers
        .iter()
        .map(|(a, m)| format!("{a} {} ({})", c.ability_scores.score(*a), signed(*m)))
        .collect();
    println!("  {}", scores.join("  "));
    println!(
        "  Proficiency: {}  Spell DC: {}  Spell attack: {}",
        signed(derived.proficiency_bonus),
        derived.spell_save_dc,
        signed(derived.attack_bonus)
    );

    let proficient: Vec<_> = derived
        .skills
        .iter()
        .filter(|(s, _)| c.is_skill_proficient(*s))
        .map(|(s, b)| format!("{s} {}", signed(*b)))
        .collect();
    if !proficient.is_empty() {
        println!("  Skills: {}", proficient.join(", "));
    }

    let slots: Vec<_> = c
        .spell_slots
        .iter()
        .filter(|(_, s)| s.total > 0)
        .map(|(level, s)| format!("L{level} {}/{}", s.available(), s.total))
        .collect();
    if !slots.is_empty() {
        println!("  Slots: {}", slots.join("  "));
    }

    let used: Vec<_> = companion_core::ActionKind::all()
        .into_iter()
        .filter(|k| c.actions.is_consumed(*k))
        .map(|k| k.name())
        .collect();
    if !used.is_empty() {
        println!("  Used: {}", used.join(", "));
    }
    if !c.conditions.is_empty() {
        let names: Vec<_> = c.conditions.iter().map(|x| x.name()).collect();
        println!("  Conditions: {}", names.join(", "));
    }
    if c.concentration {
        println!("  Concentrating");
    }
    for (kind, entries) in [(EntryKind::Ability, &c.abilities), (EntryKind::Spell, &c.spells)] {
        for (i, e) in entries.iter().enumerate() {
            let depleted = if is_depleted(c, e) { " (depleted)" } else { "" };
            let level = e
                .spell_level
                .map(|l| format!(" L{l}"))
                .unwrap_or_default();
            println!("  {kind} {i}: {}{level} [{}]{depleted}", e.name, e.action_type);
        }
    }
    for (i, item) in c.inventory.iter().enumerate() {
        println!("  item {i}: {item}");
    }
    if !c.notes.is_empty() {
        println!("  Notes: {}", c.notes);
    }
}

/// Run the driver until stdin closes or `#quit`.
pub async fn run_headless(config: CompanionConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(data_dir = %config.data_dir.display(), "Starting headless driver");
    let mut driver = Headless::open(config).await?;

    println!("=== Companion Headless Mode ===");
    println!("Type #help for commands.");
    if let Err(e) = driver.resume().await {
        println!("[ERROR] {}", e.user_message());
    }

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                println!("[ERROR] {e}");
                continue;
            }
        };

        match driver.handle(command).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("[ERROR] {}", e.user_message()),
        }
    }

    driver.detach_current().await;
    Ok(())
}
