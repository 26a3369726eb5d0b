//! Character state reducer.
//!
//! Every edit to a sheet goes through here. Each operation takes the
//! current [`Character`] by reference and returns the next one, leaving the
//! original untouched, so callers can diff snapshots and persist the result
//! as a whole document.
//!
//! [`SheetAction`] names every edit as data and [`reduce`] dispatches it.
//! Players editing their own sheet and the game master editing someone
//! else's both go through the same function; only the target differs.

use crate::id::EntryId;
use crate::world::{
    Ability, ActionEconomy, ActionKind, Character, Condition, Entry, EntryKind, NewEntry, Skill,
    MAX_SPELL_LEVEL,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a use was refused before anything changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseError {
    #[error("No {kind} with id {id}")]
    UnknownEntry { kind: EntryKind, id: EntryId },

    #[error("No spell slot of level {spell_level} or higher is available")]
    NoSlotAvailable { spell_level: u8 },

    #[error("A spell slot must be chosen to cast a level {spell_level} spell")]
    SlotRequired { spell_level: u8 },

    #[error("A level {slot} slot can't cast a level {spell_level} spell")]
    SlotBelowSpellLevel { slot: u8, spell_level: u8 },

    #[error("No level {slot} slots left")]
    SlotExhausted { slot: u8 },
}

/// Direction of a hit point change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HpChange {
    Heal,
    Damage,
}

/// Identity fields edited together from the character editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetails {
    pub name: String,
    pub class: String,
    pub race: String,
    pub level: u32,
    pub max_hp: i32,
}

/// A single edit to a character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetAction {
    SetAbilityScore { ability: Ability, score: i32 },
    ChangeHp { change: HpChange, amount: i32 },
    ToggleAction(ActionKind),
    ConfirmReactivation(ActionKind),
    ResetTurn,
    ToggleCondition(Condition),
    ToggleSkillProficiency(Skill),
    ToggleSaveProficiency(Ability),
    AddInventoryItem(String),
    RemoveInventoryItem(usize),
    AddEntry { kind: EntryKind, entry: NewEntry },
    RemoveEntry { kind: EntryKind, id: EntryId },
    AdjustSlotCapacity { level: u8, delta: i32 },
    SetSlotsUsed { level: u8, used: i32 },
    /// Use an ability or cast a spell, spending its action and, for leveled
    /// spells, one slot of the chosen level.
    Use {
        kind: EntryKind,
        id: EntryId,
        slot: Option<u8>,
    },
    UpdateDetails(CharacterDetails),
    SetArmorClass(i32),
    SetSpeed(i32),
    SetInitiative(i32),
    SetSpellcastingAbility(Ability),
    SetExtraAttackBonus(i32),
    ToggleConcentration,
    SetNotes(String),
}

/// What a reduction produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The next snapshot of the sheet.
    Updated(Character),
    /// The action is already consumed; flipping it back needs an explicit
    /// confirmation (see [`confirm_reactivation`]).
    ConfirmReactivation(ActionKind),
}

impl Transition {
    pub fn into_character(self) -> Option<Character> {
        match self {
            Transition::Updated(character) => Some(character),
            Transition::ConfirmReactivation(_) => None,
        }
    }
}

/// Apply one action to a sheet.
pub fn reduce(character: &Character, action: &SheetAction) -> Result<Transition, UseError> {
    let next = match action {
        SheetAction::SetAbilityScore { ability, score } => {
            apply_stat_change(character, *ability, *score)
        }
        SheetAction::ChangeHp { change, amount } => apply_hp_change(character, *change, *amount),
        SheetAction::ToggleAction(kind) => return Ok(toggle_action_flag(character, *kind)),
        SheetAction::ConfirmReactivation(kind) => confirm_reactivation(character, *kind),
        SheetAction::ResetTurn => reset_turn(character),
        SheetAction::ToggleCondition(condition) => toggle_condition(character, *condition),
        SheetAction::ToggleSkillProficiency(skill) => toggle_skill_proficiency(character, *skill),
        SheetAction::ToggleSaveProficiency(ability) => {
            toggle_save_proficiency(character, *ability)
        }
        SheetAction::AddInventoryItem(text) => add_inventory_item(character, text),
        SheetAction::RemoveInventoryItem(index) => remove_inventory_item(character, *index),
        SheetAction::AddEntry { kind, entry } => add_entry(character, *kind, entry.clone()),
        SheetAction::RemoveEntry { kind, id } => remove_entry(character, *kind, *id),
        SheetAction::AdjustSlotCapacity { level, delta } => {
            adjust_spell_slot_capacity(character, *level, *delta)
        }
        SheetAction::SetSlotsUsed { level, used } => set_spell_slot_used(character, *level, *used),
        SheetAction::Use { kind, id, slot } => {
            let entry = character
                .find_entry(*kind, *id)
                .ok_or(UseError::UnknownEntry {
                    kind: *kind,
                    id: *id,
                })?;
            consume_for_use(character, entry, *slot)?
        }
        SheetAction::UpdateDetails(details) => update_details(character, details),
        SheetAction::SetArmorClass(value) => set_armor_class(character, *value),
        SheetAction::SetSpeed(value) => set_speed(character, *value),
        SheetAction::SetInitiative(value) => set_initiative(character, *value),
        SheetAction::SetSpellcastingAbility(ability) => {
            set_spellcasting_ability(character, *ability)
        }
        SheetAction::SetExtraAttackBonus(value) => set_extra_attack_bonus(character, *value),
        SheetAction::ToggleConcentration => toggle_concentration(character),
        SheetAction::SetNotes(notes) => set_notes(character, notes),
    };
    Ok(Transition::Updated(next))
}

// ============================================================================
// Scores and Hit Points
// ============================================================================

/// Set an ability score. No bounds are enforced.
pub fn apply_stat_change(character: &Character, ability: Ability, score: i32) -> Character {
    let mut next = character.clone();
    next.ability_scores.set(ability, score);
    next
}

/// Heal or damage. Damage drains temporary HP before current HP. Amounts of
/// zero or less change nothing.
pub fn apply_hp_change(character: &Character, change: HpChange, amount: i32) -> Character {
    let mut next = character.clone();
    if amount <= 0 {
        return next;
    }

    let hp = &mut next.hit_points;
    match change {
        HpChange::Heal => {
            hp.current = hp.current.saturating_add(amount).min(hp.maximum);
        }
        HpChange::Damage => {
            let absorbed = hp.temporary.max(0).min(amount);
            let remaining = amount - absorbed;
            hp.temporary -= absorbed;
            hp.current = hp.current.saturating_sub(remaining).max(0);
        }
    }
    next
}

// ============================================================================
// Action Economy
// ============================================================================

/// Consume an available action, or ask for confirmation if it is already consumed.
pub fn toggle_action_flag(character: &Character, kind: ActionKind) -> Transition {
    if character.actions.is_consumed(kind) {
        return Transition::ConfirmReactivation(kind);
    }
    let mut next = character.clone();
    next.actions.set(kind, true);
    Transition::Updated(next)
}

/// Mark a consumed action as available again.
pub fn confirm_reactivation(character: &Character, kind: ActionKind) -> Character {
    let mut next = character.clone();
    next.actions.set(kind, false);
    next
}

/// Make every action available. Called at turn boundaries.
pub fn reset_turn(character: &Character) -> Character {
    let mut next = character.clone();
    next.actions = ActionEconomy::default();
    next
}

// ============================================================================
// Toggles
// ============================================================================

pub fn toggle_condition(character: &Character, condition: Condition) -> Character {
    let mut next = character.clone();
    if next.has_condition(condition) {
        next.conditions.retain(|c| *c != condition);
    } else {
        next.conditions.push(condition);
    }
    next
}

pub fn toggle_skill_proficiency(character: &Character, skill: Skill) -> Character {
    let mut next = character.clone();
    let proficient = next.is_skill_proficient(skill);
    next.skill_profs.insert(skill, !proficient);
    next
}

pub fn toggle_save_proficiency(character: &Character, ability: Ability) -> Character {
    let mut next = character.clone();
    let proficient = next.is_save_proficient(ability);
    next.saving_throw_profs.insert(ability, !proficient);
    next
}

pub fn toggle_concentration(character: &Character) -> Character {
    let mut next = character.clone();
    next.concentration = !next.concentration;
    next
}

// ============================================================================
// Collections
// ============================================================================

/// Append an inventory line. Blank text is ignored.
pub fn add_inventory_item(character: &Character, text: &str) -> Character {
    let mut next = character.clone();
    let text = text.trim();
    if !text.is_empty() {
        next.inventory.push(text.to_string());
    }
    next
}

/// Remove the inventory line at `index`. Out of range is a no-op.
pub fn remove_inventory_item(character: &Character, index: usize) -> Character {
    let mut next = character.clone();
    if index < next.inventory.len() {
        next.inventory.remove(index);
    }
    next
}

/// Add an ability or spell under a fresh id.
///
/// Spells always carry a level: missing means cantrip (0), and anything
/// past 9 is capped. Abilities never carry one.
pub fn add_entry(character: &Character, kind: EntryKind, entry: NewEntry) -> Character {
    let mut next = character.clone();
    let spell_level = match kind {
        EntryKind::Spell => Some(entry.spell_level.unwrap_or(0).min(MAX_SPELL_LEVEL)),
        EntryKind::Ability => None,
    };
    let entry = Entry {
        id: EntryId::new(),
        name: entry.name,
        description: entry.description,
        action_type: entry.action_type,
        spell_level,
    };
    match kind {
        EntryKind::Ability => next.abilities.push(entry),
        EntryKind::Spell => next.spells.push(entry),
    }
    next
}

/// Remove an entry by id. Unknown ids leave the collections as they were.
pub fn remove_entry(character: &Character, kind: EntryKind, id: EntryId) -> Character {
    let mut next = character.clone();
    match kind {
        EntryKind::Ability => next.abilities.retain(|e| e.id != id),
        EntryKind::Spell => next.spells.retain(|e| e.id != id),
    }
    next
}

// ============================================================================
// Spell Slots
// ============================================================================

/// Grow or shrink a slot level's capacity, never below zero. If capacity
/// drops under the used count, used follows it down.
pub fn adjust_spell_slot_capacity(character: &Character, level: u8, delta: i32) -> Character {
    let mut next = character.clone();
    if let Some(slot) = next.spell_slots.get_mut(level) {
        let total = (i64::from(slot.total) + i64::from(delta)).clamp(0, i64::from(u32::MAX));
        slot.total = total as u32;
        slot.used = slot.used.min(slot.total);
    }
    next
}

/// Set how many slots of a level are used, clamped to `0..=capacity`.
pub fn set_spell_slot_used(character: &Character, level: u8, used: i32) -> Character {
    let mut next = character.clone();
    if let Some(slot) = next.spell_slots.get_mut(level) {
        slot.used = (used.max(0) as u32).min(slot.total);
    }
    next
}

/// Spend what using `entry` costs.
///
/// The entry's action is always marked consumed, even if it already was.
/// A spell above level 0 also spends one slot of `slot` level, which must be
/// at or above the spell's level and have capacity left. Abilities and
/// cantrips ignore `slot`.
pub fn consume_for_use(
    character: &Character,
    entry: &Entry,
    slot: Option<u8>,
) -> Result<Character, UseError> {
    let spell_level = entry.level();
    let mut next = character.clone();
    next.actions.set(entry.action_type, true);

    if spell_level == 0 {
        return Ok(next);
    }

    if next.spell_slots.candidates_from(spell_level).is_empty() {
        return Err(UseError::NoSlotAvailable { spell_level });
    }
    let slot = slot.ok_or(UseError::SlotRequired { spell_level })?;
    if slot < spell_level {
        return Err(UseError::SlotBelowSpellLevel { slot, spell_level });
    }
    match next.spell_slots.get_mut(slot) {
        Some(info) if info.available() > 0 => info.used += 1,
        _ => return Err(UseError::SlotExhausted { slot }),
    }
    Ok(next)
}

// ============================================================================
// Sheet Details
// ============================================================================

/// Apply the character editor form.
///
/// Level is kept at 1 or above. Current HP is capped at the new maximum; a
/// current of 0 is taken as unset and starts at the new maximum.
pub fn update_details(character: &Character, details: &CharacterDetails) -> Character {
    let mut next = character.clone();
    next.name = details.name.clone();
    next.class = details.class.clone();
    next.race = details.race.clone();
    next.level = details.level.max(1);

    let max_hp = details.max_hp.max(0);
    let current = match next.hit_points.current {
        0 => max_hp,
        current => current,
    };
    next.hit_points.maximum = max_hp;
    next.hit_points.current = current.clamp(0, max_hp);
    next
}

pub fn set_armor_class(character: &Character, value: i32) -> Character {
    let mut next = character.clone();
    next.armor_class = value;
    next
}

pub fn set_speed(character: &Character, value: i32) -> Character {
    let mut next = character.clone();
    next.speed = value;
    next
}

pub fn set_initiative(character: &Character, value: i32) -> Character {
    let mut next = character.clone();
    next.initiative = value;
    next
}

pub fn set_spellcasting_ability(character: &Character, ability: Ability) -> Character {
    let mut next = character.clone();
    next.spellcasting_ability = ability;
    next
}

pub fn set_extra_attack_bonus(character: &Character, value: i32) -> Character {
    let mut next = character.clone();
    next.extra_attack_bonus = value;
    next
}

pub fn set_notes(character: &Character, notes: &str) -> Character {
    let mut next = character.clone();
    next.notes = notes.to_string();
    next
}
