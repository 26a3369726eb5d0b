//! QA tests for a player and a game master sharing one store.
//!
//! Run with: `cargo test -p companion-core --test qa_table_flow`

use companion_core::combat::is_depleted;
use companion_core::reducer::{CharacterDetails, HpChange};
use companion_core::world::{NewEntry, SlotInfo};
use companion_core::{
    ActionKind, AppSession, Applied, Condition, DerivedStats, EntryKind, Role, SessionError,
    SheetAction, Skill, TestHarness, UseError, View,
};

async fn player_and_dm(harness: &TestHarness) -> (AppSession, AppSession) {
    let player = harness
        .register("aria@example.com", "Aria", Role::Player)
        .await
        .expect("Player registration should succeed");
    let dm = harness
        .register("gm@example.com", "GM", Role::Dm)
        .await
        .expect("DM registration should succeed");
    (player, dm)
}

// =============================================================================
// Player sheet editing
// =============================================================================

#[tokio::test]
async fn test_player_builds_a_caster() {
    let harness = TestHarness::new();
    let mut session = harness
        .register("mira@example.com", "Mira", Role::Player)
        .await
        .unwrap();
    let me = session.own_character_id();

    let edits = vec![
        SheetAction::UpdateDetails(CharacterDetails {
            name: "Mira".to_string(),
            class: "Wizard".to_string(),
            race: "Elf".to_string(),
            level: 5,
            max_hp: 27,
        }),
        SheetAction::SetAbilityScore {
            ability: companion_core::Ability::Intelligence,
            score: 16,
        },
        SheetAction::ToggleSkillProficiency(Skill::Arcana),
        SheetAction::AdjustSlotCapacity { level: 3, delta: 1 },
        SheetAction::AdjustSlotCapacity { level: 5, delta: 1 },
        SheetAction::AddEntry {
            kind: EntryKind::Spell,
            entry: NewEntry::new("Fireball", ActionKind::Action).with_spell_level(3),
        },
    ];
    for edit in edits {
        session.apply(me, edit).await.unwrap();
    }

    let sheet = session.own_character().unwrap().clone();
    let derived = DerivedStats::compute(&sheet);
    assert_eq!(derived.proficiency_bonus, 3);
    assert_eq!(derived.spell_save_dc, 14);
    assert_eq!(derived.attack_bonus, 6);
    assert_eq!(derived.skill(Skill::Arcana), 6);
    assert_eq!(sheet.hit_points.current, 10);

    // Upcast with the level 5 slot
    let fireball = sheet.spells[0].id;
    let prompt = session
        .use_prompt(me, EntryKind::Spell, fireball)
        .await
        .unwrap();
    assert_eq!(prompt.candidate_slots, vec![3, 5]);
    assert!(!prompt.can_confirm(None));

    session
        .apply(
            me,
            SheetAction::Use {
                kind: EntryKind::Spell,
                id: fireball,
                slot: Some(5),
            },
        )
        .await
        .unwrap();

    let sheet = session.own_character().unwrap();
    assert_eq!(sheet.spell_slots.get(5), SlotInfo { total: 1, used: 1 });
    assert_eq!(sheet.spell_slots.get(3), SlotInfo { total: 1, used: 0 });
    assert!(sheet.actions.action);
    assert!(is_depleted(sheet, &sheet.spells[0]));

    session.flush().await;
    let stored = harness.stored(me).await.unwrap();
    assert_eq!(&stored, session.own_character().unwrap());
}

#[tokio::test]
async fn test_use_refused_leaves_sheet_alone() {
    let harness = TestHarness::new();
    let mut session = harness
        .register("mira@example.com", "Mira", Role::Player)
        .await
        .unwrap();
    let me = session.own_character_id();

    let Applied::Updated(sheet) = session
        .apply(
            me,
            SheetAction::AddEntry {
                kind: EntryKind::Spell,
                entry: NewEntry::new("Shield", ActionKind::Reaction).with_spell_level(1),
            },
        )
        .await
        .unwrap()
    else {
        panic!("Adding an entry should update the sheet");
    };
    let shield = sheet.spells[0].id;

    let result = session
        .apply(
            me,
            SheetAction::Use {
                kind: EntryKind::Spell,
                id: shield,
                slot: Some(1),
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(SessionError::Use(UseError::NoSlotAvailable { spell_level: 1 }))
    ));
    assert_eq!(session.own_character().unwrap(), &sheet);
}

#[tokio::test]
async fn test_turn_cycle() {
    let harness = TestHarness::new();
    let mut session = harness
        .register("aria@example.com", "Aria", Role::Player)
        .await
        .unwrap();
    let me = session.own_character_id();

    for kind in [ActionKind::Action, ActionKind::Movement] {
        session.apply(me, SheetAction::ToggleAction(kind)).await.unwrap();
    }
    session
        .apply(me, SheetAction::ToggleCondition(Condition::Prone))
        .await
        .unwrap();
    session
        .apply(
            me,
            SheetAction::ChangeHp {
                change: HpChange::Damage,
                amount: 4,
            },
        )
        .await
        .unwrap();

    let sheet = session.own_character().unwrap();
    assert!(sheet.actions.action && sheet.actions.movement);
    assert!(sheet.has_condition(Condition::Prone));
    assert_eq!(sheet.hit_points.current, 6);

    session.apply(me, SheetAction::ResetTurn).await.unwrap();
    assert!(!session.own_character().unwrap().actions.any_consumed());
}

// =============================================================================
// Game master path
// =============================================================================

#[tokio::test]
async fn test_dm_edits_player_sheet_with_same_actions() {
    let harness = TestHarness::new();
    let (mut player, mut dm) = player_and_dm(&harness).await;
    let aria = player.own_character_id();

    dm.set_view(View::Dm);
    dm.refresh().await.unwrap();
    let roster: Vec<_> = dm.dm_roster().into_iter().map(|c| c.id).collect();
    assert_eq!(roster, vec![aria]);

    dm.inspect(aria).await.unwrap();
    dm.apply(
        aria,
        SheetAction::ChangeHp {
            change: HpChange::Damage,
            amount: 7,
        },
    )
    .await
    .unwrap();
    dm.apply(aria, SheetAction::ToggleAction(ActionKind::Reaction))
        .await
        .unwrap();

    // Game master re-toggles and must confirm like the player would
    let applied = dm
        .apply(aria, SheetAction::ToggleAction(ActionKind::Reaction))
        .await
        .unwrap();
    assert!(matches!(applied, Applied::NeedsConfirmation(_)));
    assert!(dm.confirm_reactivation().await.unwrap());
    dm.flush().await;

    player.refresh().await.unwrap();
    let sheet = player.own_character().unwrap();
    assert_eq!(sheet.hit_points.current, 3);
    assert!(!sheet.actions.reaction);
}

#[tokio::test]
async fn test_combat_order_includes_npcs() {
    let harness = TestHarness::new();
    let (mut player, mut dm) = player_and_dm(&harness).await;

    let me = player.own_character_id();
    player.apply(me, SheetAction::SetInitiative(14)).await.unwrap();
    player.flush().await;

    let goblin = dm.create_npc("Goblin").await.unwrap();
    dm.apply(goblin.id, SheetAction::SetInitiative(17))
        .await
        .unwrap();
    dm.flush().await;

    player.set_view(View::Combat);
    player.refresh().await.unwrap();
    let order: Vec<_> = player
        .combat_order()
        .into_iter()
        .map(|c| (c.name, c.initiative))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Goblin".to_string(), 17),
            ("Aria".to_string(), 14),
            ("GM".to_string(), 0),
        ]
    );

    // Players see the roster but can only write their own sheet
    let result = player.apply(goblin.id, SheetAction::ResetTurn).await;
    assert!(matches!(result, Err(SessionError::NotPermitted)));
}

// =============================================================================
// Known race: last write wins
// =============================================================================

#[tokio::test]
async fn test_concurrent_writers_last_write_wins() {
    let harness = TestHarness::new();
    let (mut player, mut dm) = player_and_dm(&harness).await;
    let aria = player.own_character_id();
    dm.inspect(aria).await.unwrap();

    // Both start from the same snapshot
    player
        .apply(aria, SheetAction::AddInventoryItem("Potion".to_string()))
        .await
        .unwrap();
    player.flush().await;

    dm.apply(aria, SheetAction::SetNotes("Cursed".to_string()))
        .await
        .unwrap();
    dm.flush().await;

    // The game master's snapshot predates the potion, so it is gone
    let stored = harness.stored(aria).await.unwrap();
    assert_eq!(stored.notes, "Cursed");
    assert!(stored.inventory.is_empty());

    // The player's cache keeps the potion until the next refresh
    assert_eq!(player.own_character().unwrap().inventory, vec!["Potion"]);
    player.refresh().await.unwrap();
    assert!(player.own_character().unwrap().inventory.is_empty());
}

#[tokio::test]
async fn test_sign_in_after_sign_out() {
    let harness = TestHarness::new();
    let mut session = harness
        .register("aria@example.com", "Aria", Role::Player)
        .await
        .unwrap();
    let me = session.own_character_id();
    session
        .apply(me, SheetAction::ToggleSaveProficiency(companion_core::Ability::Wisdom))
        .await
        .unwrap();
    session.sign_out().await.unwrap();

    let session = harness.sign_in("aria@example.com").await.unwrap();
    assert!(session
        .own_character()
        .unwrap()
        .is_save_proficient(companion_core::Ability::Wisdom));
}
