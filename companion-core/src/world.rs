//! Character sheet types.
//!
//! Contains everything stored in a character document: ability scores,
//! the skill and condition catalogs, hit points, spell slots, the per-turn
//! action economy and the ability/spell entries, plus the user profile kept
//! alongside it.

use crate::id::{CharacterId, EntryId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Score assumed for an ability that has no value on the sheet.
pub const BASELINE_SCORE: i32 = 10;

/// Highest spell slot level.
pub const MAX_SPELL_LEVEL: u8 = 9;

/// Error returned when a name doesn't match any catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseNameError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// ============================================================================
// Ability Scores
// ============================================================================

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    #[serde(rename = "STR")]
    Strength,
    #[serde(rename = "DEX")]
    Dexterity,
    #[serde(rename = "CON")]
    Constitution,
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "WIS")]
    Wisdom,
    #[serde(rename = "CHA")]
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for Ability {
    type Err = ParseNameError;

    /// Accepts either the abbreviation or the full name, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ability::all()
            .into_iter()
            .find(|a| {
                a.abbreviation().eq_ignore_ascii_case(s) || a.name().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| ParseNameError::new("ability", s))
    }
}

/// Ability scores by ability.
///
/// Scores are nominally 1-30 but nothing here enforces it. An ability with
/// no entry reads as [`BASELINE_SCORE`], so a half-filled document still
/// yields sane modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityScores(BTreeMap<Ability, i32>);

impl AbilityScores {
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        let scores = Ability::all().into_iter().zip([str, dex, con, int, wis, cha]);
        Self(scores.collect())
    }

    /// A sheet with no scores recorded at all.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// The recorded score, if any.
    pub fn get(&self, ability: Ability) -> Option<i32> {
        self.0.get(&ability).copied()
    }

    /// The score, falling back to the baseline when missing.
    pub fn score(&self, ability: Ability) -> i32 {
        self.get(ability).unwrap_or(BASELINE_SCORE)
    }

    pub fn set(&mut self, ability: Ability, value: i32) {
        self.0.insert(ability, value);
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

// ============================================================================
// Skills
// ============================================================================

/// The eighteen skills, keyed the way the sheet document stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Skill {
    #[serde(rename = "acrobatics")]
    Acrobatics,
    #[serde(rename = "animalH")]
    AnimalHandling,
    #[serde(rename = "arcana")]
    Arcana,
    #[serde(rename = "athletics")]
    Athletics,
    #[serde(rename = "deception")]
    Deception,
    #[serde(rename = "history")]
    History,
    #[serde(rename = "insight")]
    Insight,
    #[serde(rename = "intimidation")]
    Intimidation,
    #[serde(rename = "investigation")]
    Investigation,
    #[serde(rename = "medicine")]
    Medicine,
    #[serde(rename = "nature")]
    Nature,
    #[serde(rename = "perception")]
    Perception,
    #[serde(rename = "performance")]
    Performance,
    #[serde(rename = "persuasion")]
    Persuasion,
    #[serde(rename = "religion")]
    Religion,
    #[serde(rename = "sleightOfHand")]
    SleightOfHand,
    #[serde(rename = "stealth")]
    Stealth,
    #[serde(rename = "survival")]
    Survival,
}

impl Skill {
    /// The governing ability for this skill.
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Ability::Charisma
            }
        }
    }

    /// Stable key used in stored documents.
    pub fn key(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "acrobatics",
            Skill::AnimalHandling => "animalH",
            Skill::Arcana => "arcana",
            Skill::Athletics => "athletics",
            Skill::Deception => "deception",
            Skill::History => "history",
            Skill::Insight => "insight",
            Skill::Intimidation => "intimidation",
            Skill::Investigation => "investigation",
            Skill::Medicine => "medicine",
            Skill::Nature => "nature",
            Skill::Perception => "perception",
            Skill::Performance => "performance",
            Skill::Persuasion => "persuasion",
            Skill::Religion => "religion",
            Skill::SleightOfHand => "sleightOfHand",
            Skill::Stealth => "stealth",
            Skill::Survival => "survival",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "Acrobatics",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Arcana => "Arcana",
            Skill::Athletics => "Athletics",
            Skill::Deception => "Deception",
            Skill::History => "History",
            Skill::Insight => "Insight",
            Skill::Intimidation => "Intimidation",
            Skill::Investigation => "Investigation",
            Skill::Medicine => "Medicine",
            Skill::Nature => "Nature",
            Skill::Perception => "Perception",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
            Skill::Religion => "Religion",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Survival => "Survival",
        }
    }

    /// Look up a skill by its stored key.
    pub fn from_key(key: &str) -> Option<Skill> {
        Skill::all().into_iter().find(|s| s.key() == key)
    }

    pub fn all() -> [Skill; 18] {
        [
            Skill::Acrobatics,
            Skill::AnimalHandling,
            Skill::Arcana,
            Skill::Athletics,
            Skill::Deception,
            Skill::History,
            Skill::Insight,
            Skill::Intimidation,
            Skill::Investigation,
            Skill::Medicine,
            Skill::Nature,
            Skill::Perception,
            Skill::Performance,
            Skill::Persuasion,
            Skill::Religion,
            Skill::SleightOfHand,
            Skill::Stealth,
            Skill::Survival,
        ]
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Conditions
// ============================================================================

/// Status effects that can be toggled on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Exhausted,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralyzed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
}

impl Condition {
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Blinded => "Blinded",
            Condition::Charmed => "Charmed",
            Condition::Deafened => "Deafened",
            Condition::Exhausted => "Exhausted",
            Condition::Frightened => "Frightened",
            Condition::Grappled => "Grappled",
            Condition::Incapacitated => "Incapacitated",
            Condition::Invisible => "Invisible",
            Condition::Paralyzed => "Paralyzed",
            Condition::Petrified => "Petrified",
            Condition::Poisoned => "Poisoned",
            Condition::Prone => "Prone",
            Condition::Restrained => "Restrained",
            Condition::Stunned => "Stunned",
            Condition::Unconscious => "Unconscious",
        }
    }

    pub fn all() -> [Condition; 15] {
        [
            Condition::Blinded,
            Condition::Charmed,
            Condition::Deafened,
            Condition::Exhausted,
            Condition::Frightened,
            Condition::Grappled,
            Condition::Incapacitated,
            Condition::Invisible,
            Condition::Paralyzed,
            Condition::Petrified,
            Condition::Poisoned,
            Condition::Prone,
            Condition::Restrained,
            Condition::Stunned,
            Condition::Unconscious,
        ]
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Condition {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::all()
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseNameError::new("condition", s))
    }
}

// ============================================================================
// Action Economy
// ============================================================================

/// The five per-turn action categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Action,
    BonusAction,
    Reaction,
    FreeAction,
    Movement,
}

impl ActionKind {
    pub fn key(&self) -> &'static str {
        match self {
            ActionKind::Action => "action",
            ActionKind::BonusAction => "bonusAction",
            ActionKind::Reaction => "reaction",
            ActionKind::FreeAction => "freeAction",
            ActionKind::Movement => "movement",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Action => "Action",
            ActionKind::BonusAction => "Bonus Action",
            ActionKind::Reaction => "Reaction",
            ActionKind::FreeAction => "Free Action",
            ActionKind::Movement => "Movement",
        }
    }

    pub fn all() -> [ActionKind; 5] {
        [
            ActionKind::Action,
            ActionKind::BonusAction,
            ActionKind::Reaction,
            ActionKind::FreeAction,
            ActionKind::Movement,
        ]
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ActionKind {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::all()
            .into_iter()
            .find(|a| a.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseNameError::new("action", s))
    }
}

/// Which actions have been consumed this turn. `true` means used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionEconomy {
    pub action: bool,
    pub bonus_action: bool,
    pub reaction: bool,
    pub free_action: bool,
    pub movement: bool,
}

impl ActionEconomy {
    pub fn is_consumed(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Action => self.action,
            ActionKind::BonusAction => self.bonus_action,
            ActionKind::Reaction => self.reaction,
            ActionKind::FreeAction => self.free_action,
            ActionKind::Movement => self.movement,
        }
    }

    pub fn set(&mut self, kind: ActionKind, consumed: bool) {
        match kind {
            ActionKind::Action => self.action = consumed,
            ActionKind::BonusAction => self.bonus_action = consumed,
            ActionKind::Reaction => self.reaction = consumed,
            ActionKind::FreeAction => self.free_action = consumed,
            ActionKind::Movement => self.movement = consumed,
        }
    }

    pub fn any_consumed(&self) -> bool {
        ActionKind::all().into_iter().any(|k| self.is_consumed(k))
    }
}

// ============================================================================
// Hit Points
// ============================================================================

/// Hit points tracking. Temporary HP is a separate buffer that soaks damage first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: i32,
    #[serde(rename = "max")]
    pub maximum: i32,
    #[serde(rename = "temp", default)]
    pub temporary: i32,
}

impl HitPoints {
    pub fn new(maximum: i32) -> Self {
        Self {
            current: maximum,
            maximum,
            temporary: 0,
        }
    }

    pub fn ratio(&self) -> f32 {
        if self.maximum <= 0 {
            return 0.0;
        }
        (self.current as f32 / self.maximum as f32).clamp(0.0, 1.0)
    }
}

impl Default for HitPoints {
    fn default() -> Self {
        Self::new(10)
    }
}

// ============================================================================
// Spellcasting
// ============================================================================

/// Capacity and usage for one spell slot level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    pub total: u32,
    pub used: u32,
}

impl SlotInfo {
    pub fn available(&self) -> u32 {
        self.total.saturating_sub(self.used)
    }
}

/// Spell slots for levels 1 through 9.
///
/// Stored as two maps keyed by level, `spellSlots` for capacity and
/// `spellSlotsUsed` for usage, flattened into the character document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SlotMaps", into = "SlotMaps")]
pub struct SpellSlots {
    slots: [SlotInfo; 9],
}

/// Stored shape of [`SpellSlots`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotMaps {
    pub spell_slots: BTreeMap<String, u32>,
    pub spell_slots_used: BTreeMap<String, u32>,
}

impl From<SpellSlots> for SlotMaps {
    fn from(slots: SpellSlots) -> Self {
        let mut maps = SlotMaps::default();
        for (level, slot) in slots.iter() {
            maps.spell_slots.insert(level.to_string(), slot.total);
            maps.spell_slots_used.insert(level.to_string(), slot.used);
        }
        maps
    }
}

impl From<SlotMaps> for SpellSlots {
    /// Keys that aren't a level from 1 to 9 are dropped.
    fn from(maps: SlotMaps) -> Self {
        let mut slots = SpellSlots::new();
        for (key, total) in maps.spell_slots {
            if let Some(slot) = key.parse().ok().and_then(|level| slots.get_mut(level)) {
                slot.total = total;
            }
        }
        for (key, used) in maps.spell_slots_used {
            if let Some(slot) = key.parse().ok().and_then(|level| slots.get_mut(level)) {
                slot.used = used;
            }
        }
        slots
    }
}

impl SpellSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot info for a level. Levels outside 1..=9 read as an empty slot.
    pub fn get(&self, level: u8) -> SlotInfo {
        Self::index(level)
            .map(|i| self.slots[i])
            .unwrap_or_default()
    }

    /// Mutable slot info, or `None` for a level outside 1..=9.
    pub fn get_mut(&mut self, level: u8) -> Option<&mut SlotInfo> {
        match Self::index(level) {
            Some(i) => Some(&mut self.slots[i]),
            None => None,
        }
    }

    /// Iterate `(level, slot)` pairs from level 1 upward.
    pub fn iter(&self) -> impl Iterator<Item = (u8, SlotInfo)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (i as u8 + 1, *slot))
    }

    /// Levels a spell of `spell_level` could be cast with: that level or
    /// higher, with at least one slot left. Cantrips start the search at 1.
    pub fn candidates_from(&self, spell_level: u8) -> Vec<u8> {
        self.iter()
            .filter(|(level, slot)| *level >= spell_level && slot.available() > 0)
            .map(|(level, _)| level)
            .collect()
    }

    /// Total slots left at `spell_level` and above.
    pub fn remaining_from(&self, spell_level: u8) -> u32 {
        self.iter()
            .filter(|(level, _)| *level >= spell_level)
            .map(|(_, slot)| slot.available())
            .sum()
    }

    fn index(level: u8) -> Option<usize> {
        (1..=MAX_SPELL_LEVEL)
            .contains(&level)
            .then(|| level as usize - 1)
    }
}

// ============================================================================
// Abilities and Spells
// ============================================================================

/// Which collection an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Ability,
    Spell,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Ability => write!(f, "ability"),
            EntryKind::Spell => write!(f, "spell"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ability" => Ok(EntryKind::Ability),
            "spell" => Ok(EntryKind::Spell),
            _ => Err(ParseNameError::new("entry kind", s)),
        }
    }
}

/// A special ability or spell on a sheet. Entries are added and removed,
/// never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    pub action_type: ActionKind,
    /// Spell level 0-9; `None` for abilities. Cantrips are level 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spell_level: Option<u8>,
}

impl Entry {
    /// Spell level, treating abilities and missing values as 0.
    pub fn level(&self) -> u8 {
        self.spell_level.unwrap_or(0)
    }
}

/// An entry as typed in by the user, before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    pub action_type: ActionKind,
    #[serde(default)]
    pub spell_level: Option<u8>,
}

impl NewEntry {
    pub fn new(name: impl Into<String>, action_type: ActionKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            action_type,
            spell_level: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_spell_level(mut self, level: u8) -> Self {
        self.spell_level = Some(level);
        self
    }
}

// ============================================================================
// Users and Characters
// ============================================================================

/// Whether an identity plays a character or runs the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Player,
    Dm,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Player => write!(f, "player"),
            Role::Dm => write!(f, "dm"),
        }
    }
}

impl FromStr for Role {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "player" => Ok(Role::Player),
            "dm" | "gm" => Ok(Role::Dm),
            _ => Err(ParseNameError::new("role", s)),
        }
    }
}

/// Profile written once at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub role: Role,
    pub display_name: String,
    #[serde(default)]
    pub email: String,
}

/// A full character sheet document.
///
/// Every field has a default, so a partially written document still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub class: String,
    pub race: String,
    pub level: u32,
    pub role: Role,

    #[serde(rename = "stats")]
    pub ability_scores: AbilityScores,
    #[serde(rename = "hp")]
    pub hit_points: HitPoints,
    #[serde(rename = "ac")]
    pub armor_class: i32,
    pub speed: i32,
    pub initiative: i32,

    pub skill_profs: BTreeMap<Skill, bool>,
    pub saving_throw_profs: BTreeMap<Ability, bool>,

    #[serde(rename = "spellcastingStat")]
    pub spellcasting_ability: Ability,
    #[serde(rename = "attackBonusExtra")]
    pub extra_attack_bonus: i32,
    #[serde(flatten)]
    pub spell_slots: SpellSlots,

    pub inventory: Vec<String>,
    pub abilities: Vec<Entry>,
    pub spells: Vec<Entry>,

    pub conditions: Vec<Condition>,
    pub concentration: bool,
    pub actions: ActionEconomy,
    pub notes: String,
}

impl Character {
    /// A blank level 1 sheet keyed by `id`.
    pub fn new_for(id: CharacterId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            class: "Fighter".to_string(),
            race: "Human".to_string(),
            level: 1,
            role,
            ability_scores: AbilityScores::default(),
            hit_points: HitPoints::default(),
            armor_class: 10,
            speed: 30,
            initiative: 0,
            skill_profs: BTreeMap::new(),
            saving_throw_profs: BTreeMap::new(),
            spellcasting_ability: Ability::Intelligence,
            extra_attack_bonus: 0,
            spell_slots: SpellSlots::new(),
            inventory: Vec::new(),
            abilities: Vec::new(),
            spells: Vec::new(),
            conditions: Vec::new(),
            concentration: false,
            actions: ActionEconomy::default(),
            notes: String::new(),
        }
    }

    pub fn is_skill_proficient(&self, skill: Skill) -> bool {
        self.skill_profs.get(&skill).copied().unwrap_or(false)
    }

    pub fn is_save_proficient(&self, ability: Ability) -> bool {
        self.saving_throw_profs.get(&ability).copied().unwrap_or(false)
    }

    pub fn has_condition(&self, condition: Condition) -> bool {
        self.conditions.contains(&condition)
    }

    pub fn entries(&self, kind: EntryKind) -> &[Entry] {
        match kind {
            EntryKind::Ability => &self.abilities,
            EntryKind::Spell => &self.spells,
        }
    }

    pub fn find_entry(&self, kind: EntryKind, id: EntryId) -> Option<&Entry> {
        self.entries(kind).iter().find(|e| e.id == id)
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new_for(CharacterId::new(), "Hero", Role::Player)
    }
}
