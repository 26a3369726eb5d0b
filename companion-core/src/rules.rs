//! Derived statistics for a character sheet.
//!
//! Everything here is a pure function of a [`Character`] snapshot: nothing
//! is stored, so callers recompute after every change to the sheet.

use crate::world::{Ability, Character, Skill};
use serde::{Deserialize, Serialize};

/// Base of the spell save DC formula.
const SPELL_SAVE_BASE: i32 = 8;

/// Proficiency bonus for a character level: `ceil(level / 4) + 1`.
///
/// Not clamped; callers pass a level of at least 1.
pub fn proficiency_bonus(level: u32) -> i32 {
    level.div_ceil(4) as i32 + 1
}

/// Ability modifier for a score: `floor((score - 10) / 2)`.
pub fn modifier(score: i32) -> i32 {
    // Floor division so 9 is -1, not 0
    score.saturating_sub(10).div_euclid(2)
}

/// Proficiency bonus for this character. A level of 0 counts as level 1.
pub fn character_proficiency(character: &Character) -> i32 {
    proficiency_bonus(character.level.max(1))
}

/// Modifier for one of the character's abilities. Missing scores count as 10.
pub fn ability_modifier(character: &Character, ability: Ability) -> i32 {
    modifier(character.ability_scores.score(ability))
}

pub fn skill_bonus(character: &Character, skill: Skill) -> i32 {
    let base = ability_modifier(character, skill.ability());
    if character.is_skill_proficient(skill) {
        base.saturating_add(character_proficiency(character))
    } else {
        base
    }
}

/// Skill bonus looked up by stored key. Unknown keys yield 0 rather than an error.
pub fn skill_bonus_by_key(character: &Character, key: &str) -> i32 {
    Skill::from_key(key)
        .map(|skill| skill_bonus(character, skill))
        .unwrap_or(0)
}

pub fn save_bonus(character: &Character, ability: Ability) -> i32 {
    let base = ability_modifier(character, ability);
    if character.is_save_proficient(ability) {
        base.saturating_add(character_proficiency(character))
    } else {
        base
    }
}

pub fn spell_save_dc(character: &Character) -> i32 {
    SPELL_SAVE_BASE
        .saturating_add(character_proficiency(character))
        .saturating_add(ability_modifier(character, character.spellcasting_ability))
}

/// Spell attack bonus, including the sheet's flat extra bonus.
pub fn attack_bonus(character: &Character) -> i32 {
    character_proficiency(character)
        .saturating_add(ability_modifier(character, character.spellcasting_ability))
        .saturating_add(character.extra_attack_bonus)
}

/// Format a bonus with an explicit sign, e.g. `+3` or `-1`.
pub fn signed(value: i32) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Every derived number on a sheet, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub proficiency_bonus: i32,
    pub modifiers: Vec<(Ability, i32)>,
    pub skills: Vec<(Skill, i32)>,
    pub saves: Vec<(Ability, i32)>,
    pub spell_save_dc: i32,
    pub attack_bonus: i32,
}

impl DerivedStats {
    pub fn compute(character: &Character) -> Self {
        Self {
            proficiency_bonus: character_proficiency(character),
            modifiers: Ability::all()
                .into_iter()
                .map(|a| (a, ability_modifier(character, a)))
                .collect(),
            skills: Skill::all()
                .into_iter()
                .map(|s| (s, skill_bonus(character, s)))
                .collect(),
            saves: Ability::all()
                .into_iter()
                .map(|a| (a, save_bonus(character, a)))
                .collect(),
            spell_save_dc: spell_save_dc(character),
            attack_bonus: attack_bonus(character),
        }
    }

    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills
            .iter()
            .find(|(s, _)| *s == skill)
            .map(|(_, bonus)| *bonus)
            .unwrap_or(0)
    }

    pub fn save(&self, ability: Ability) -> i32 {
        self.saves
            .iter()
            .find(|(a, _)| *a == ability)
            .map(|(_, bonus)| *bonus)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::CharacterId;
    use crate::world::{AbilityScores, Role};

    fn blank() -> Character {
        Character::new_for(CharacterId::new(), "Test", Role::Player)
    }

    #[test]
    fn test_modifier() {
        assert_eq!(modifier(10), 0);
        assert_eq!(modifier(11), 0);
        assert_eq!(modifier(8), -1);
        assert_eq!(modifier(9), -1);
        assert_eq!(modifier(7), -2);
        assert_eq!(modifier(20), 5);
        assert_eq!(modifier(1), -5);
        assert_eq!(modifier(30), 10);
    }

    #[test]
    fn test_extreme_scores_do_not_overflow() {
        assert_eq!(modifier(i32::MIN), (i32::MIN / 2));
        assert_eq!(modifier(i32::MIN + 5), (i32::MIN / 2));
        assert_eq!(modifier(i32::MAX), (i32::MAX - 10) / 2);

        let mut character = blank();
        character.level = u32::MAX;
        character.ability_scores = AbilityScores::new(i32::MIN, i32::MAX, 10, i32::MAX, 10, 10);
        character.extra_attack_bonus = i32::MAX;
        for skill in Skill::all() {
            character.skill_profs.insert(skill, true);
        }
        let derived = DerivedStats::compute(&character);
        assert_eq!(derived.modifiers[0].1, i32::MIN / 2);
        assert_eq!(derived.attack_bonus, i32::MAX);
        assert!(derived.skill(Skill::Stealth) > 0);
    }

    #[test]
    fn test_proficiency_bonus() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(8), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
    }

    #[test]
    fn test_level_zero_counts_as_one() {
        let mut character = blank();
        character.level = 0;
        assert_eq!(character_proficiency(&character), 2);
    }

    #[test]
    fn test_skill_bonus() {
        let mut character = blank();
        character.level = 5;
        character.ability_scores.set(Ability::Dexterity, 16);
        assert_eq!(skill_bonus(&character, Skill::Stealth), 3);

        character.skill_profs.insert(Skill::Stealth, true);
        assert_eq!(skill_bonus(&character, Skill::Stealth), 6);
        assert_eq!(skill_bonus_by_key(&character, "stealth"), 6);

        // A false entry is the same as no entry
        character.skill_profs.insert(Skill::Arcana, false);
        assert_eq!(skill_bonus(&character, Skill::Arcana), 0);
    }

    #[test]
    fn test_unknown_skill_key_is_zero() {
        let mut character = blank();
        character.ability_scores = AbilityScores::new(20, 20, 20, 20, 20, 20);
        assert_eq!(skill_bonus_by_key(&character, "flying"), 0);
    }

    #[test]
    fn test_save_bonus() {
        let mut character = blank();
        character.ability_scores.set(Ability::Constitution, 14);
        assert_eq!(save_bonus(&character, Ability::Constitution), 2);

        character.saving_throw_profs.insert(Ability::Constitution, true);
        assert_eq!(save_bonus(&character, Ability::Constitution), 4);
    }

    #[test]
    fn test_spellcasting_scenario() {
        let mut character = blank();
        character.level = 5;
        character.ability_scores.set(Ability::Intelligence, 16);
        character.spellcasting_ability = Ability::Intelligence;

        assert_eq!(character_proficiency(&character), 3);
        assert_eq!(spell_save_dc(&character), 14);
        assert_eq!(attack_bonus(&character), 6);

        character.extra_attack_bonus = 2;
        assert_eq!(attack_bonus(&character), 8);
    }

    #[test]
    fn test_missing_scores_use_baseline() {
        let mut character = blank();
        character.ability_scores = AbilityScores::empty();
        character.spellcasting_ability = Ability::Charisma;

        assert_eq!(skill_bonus(&character, Skill::Persuasion), 0);
        assert_eq!(save_bonus(&character, Ability::Wisdom), 0);
        assert_eq!(spell_save_dc(&character), 10);
        assert_eq!(attack_bonus(&character), 2);
    }

    #[test]
    fn test_derived_stats_snapshot() {
        let mut character = blank();
        character.level = 9;
        character.ability_scores.set(Ability::Wisdom, 18);
        character.skill_profs.insert(Skill::Perception, true);
        character.saving_throw_profs.insert(Ability::Wisdom, true);

        let derived = DerivedStats::compute(&character);
        assert_eq!(derived.proficiency_bonus, 4);
        assert_eq!(derived.skill(Skill::Perception), 8);
        assert_eq!(derived.skill(Skill::Insight), 4);
        assert_eq!(derived.save(Ability::Wisdom), 8);
        assert_eq!(derived.modifiers.len(), 6);
        assert_eq!(derived.skills.len(), 18);
    }

    #[test]
    fn test_signed() {
        assert_eq!(signed(3), "+3");
        assert_eq!(signed(0), "+0");
        assert_eq!(signed(-2), "-2");
    }
}
