//! Combat helpers layered over the reducer.
//!
//! Covers the "use" prompt shown before an ability or spell is spent, the
//! pending reactivation confirmation, and the roster views the game master
//! and combat screens sort and filter.

use crate::id::CharacterId;
use crate::world::{ActionKind, Character, Entry, Role};

/// What the use prompt needs to know about one entry on one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsePrompt {
    pub action: ActionKind,
    pub spell_level: u8,
    /// Whether a slot must be chosen before confirming.
    pub needs_slot: bool,
    /// Slot levels that could pay for the entry, lowest first.
    pub candidate_slots: Vec<u8>,
    /// The entry's action is already spent this turn. Using it anyway is
    /// allowed; this only drives a warning.
    pub action_already_used: bool,
}

impl UsePrompt {
    pub fn new(character: &Character, entry: &Entry) -> Self {
        let spell_level = entry.level();
        let needs_slot = spell_level > 0;
        let candidate_slots = if needs_slot {
            character.spell_slots.candidates_from(spell_level)
        } else {
            Vec::new()
        };
        Self {
            action: entry.action_type,
            spell_level,
            needs_slot,
            candidate_slots,
            action_already_used: character.actions.is_consumed(entry.action_type),
        }
    }

    /// Whether confirming with `chosen` would go through.
    ///
    /// A leveled spell needs an explicit choice from the candidates. There is
    /// no default slot.
    pub fn can_confirm(&self, chosen: Option<u8>) -> bool {
        if !self.needs_slot {
            return true;
        }
        chosen.is_some_and(|level| self.candidate_slots.contains(&level))
    }
}

/// An entry can't be used right now: its action is spent, or it needs a
/// slot and none is left.
pub fn is_depleted(character: &Character, entry: &Entry) -> bool {
    let prompt = UsePrompt::new(character, entry);
    prompt.action_already_used || (prompt.needs_slot && prompt.candidate_slots.is_empty())
}

/// Slots left at `level` and above.
pub fn slots_remaining_for(character: &Character, level: u8) -> u32 {
    character.spell_slots.remaining_from(level)
}

/// A consumed action waiting on the user to confirm flipping it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactivationPrompt {
    pub target: CharacterId,
    pub action: ActionKind,
}

/// Roster ordered by initiative, highest first. Ties keep roster order.
pub fn combat_order(roster: &[Character]) -> Vec<Character> {
    let mut ordered = roster.to_vec();
    ordered.sort_by(|a, b| b.initiative.cmp(&a.initiative));
    ordered
}

/// Roster as the game master sees it: everyone except game master sheets.
pub fn dm_roster(roster: &[Character]) -> Vec<Character> {
    roster
        .iter()
        .filter(|c| c.role != Role::Dm)
        .cloned()
        .collect()
}
