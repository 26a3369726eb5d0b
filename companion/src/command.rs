//! Parsing of headless `#command` lines.

use companion_core::reducer::{CharacterDetails, HpChange, SheetAction};
use companion_core::world::NewEntry;
use companion_core::{
    Ability, ActionKind, CharacterId, Condition, EntryId, EntryKind, Role, Skill, View,
};
use std::str::FromStr;

/// An entry picked by its position in the list or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef {
    Index(usize),
    Id(EntryId),
}

/// A roster member picked by its position or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterRef {
    Index(usize),
    Id(CharacterId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register {
        email: String,
        password: String,
        role: Role,
        display_name: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    Status,
    /// A sheet edit applied to the current target.
    Edit(SheetAction),
    RemoveEntry {
        kind: EntryKind,
        entry: EntryRef,
    },
    Use {
        kind: EntryKind,
        entry: EntryRef,
        slot: Option<u8>,
    },
    Confirm,
    Dismiss,
    Roster,
    Order,
    Inspect(CharacterRef),
    Back,
    Npc(String),
    View(View),
    Help,
    Quit,
}

pub const HELP: &str = "\
  #register <email> <password> <player|dm> <display name>
  #login <email> <password>      #logout
  #status                        - Show the sheet being edited
  #hp heal|damage <n>            #stat <ability> <score>
  #toggle <action>               - action, bonusAction, reaction, freeAction, movement
  #confirm | #dismiss            - Resolve a pending reactivation
  #reset                         - Start a new turn
  #condition <name>              #skill <key>        #save <ability>
  #item add <text>               #item remove <index>
  #ability add <action> <name>   #ability remove <index|id>
  #spell add <level> <action> <name>
  #spell remove <index|id>
  #use ability|spell <index|id> [slot]
  #slots capacity <level> <delta>
  #slots used <level> <n>
  #details <level> <max hp> <class> <race> <name>
  #ac <n>  #speed <n>  #init <n>  #bonus <n>  #caster <ability>
  #concentration                 #notes <text>
  #roster  #order  #inspect <index|id>  #back  #npc <name>
  #view sheet|combat|dm
  #help  #quit";

fn parse_arg<T: FromStr>(arg: Option<&str>, usage: &str) -> Result<T, String> {
    arg.and_then(|a| a.parse().ok())
        .ok_or_else(|| format!("Usage: {usage}"))
}

fn rest(parts: &[&str], from: usize) -> String {
    parts.get(from..).map(|p| p.join(" ")).unwrap_or_default()
}

fn parse_entry_ref(arg: Option<&str>, usage: &str) -> Result<EntryRef, String> {
    let arg = arg.ok_or_else(|| format!("Usage: {usage}"))?;
    if let Ok(index) = arg.parse() {
        return Ok(EntryRef::Index(index));
    }
    arg.parse()
        .map(EntryRef::Id)
        .map_err(|_| format!("Not an index or id: {arg}"))
}

fn parse_character_ref(arg: Option<&str>) -> Result<CharacterRef, String> {
    let arg = arg.ok_or("Usage: #inspect <index|id>")?;
    if let Ok(index) = arg.parse() {
        return Ok(CharacterRef::Index(index));
    }
    arg.parse()
        .map(CharacterRef::Id)
        .map_err(|_| format!("Not an index or id: {arg}"))
}

fn parse_name<T>(arg: Option<&str>, usage: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let arg = arg.ok_or_else(|| format!("Usage: {usage}"))?;
    arg.parse().map_err(|e: T::Err| e.to_string())
}

/// Parse one line. A leading `#` is optional.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let line = line.strip_prefix('#').unwrap_or(line);
    let parts: Vec<&str> = line.split_whitespace().collect();
    let arg = |i: usize| parts.get(i).copied();

    let command = match parts.first().copied().unwrap_or_default() {
        "register" => {
            let usage = "#register <email> <password> <player|dm> <display name>";
            let (Some(email), Some(password)) = (arg(1), arg(2)) else {
                return Err(format!("Usage: {usage}"));
            };
            Command::Register {
                email: email.to_string(),
                password: password.to_string(),
                role: parse_name(arg(3), usage)?,
                display_name: rest(&parts, 4),
            }
        }
        "login" => {
            let (Some(email), Some(password)) = (arg(1), arg(2)) else {
                return Err("Usage: #login <email> <password>".to_string());
            };
            Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            }
        }
        "logout" => Command::Logout,
        "status" => Command::Status,
        "hp" => {
            let usage = "#hp heal|damage <n>";
            let change = match arg(1) {
                Some("heal") => HpChange::Heal,
                Some("damage") => HpChange::Damage,
                _ => return Err(format!("Usage: {usage}")),
            };
            Command::Edit(SheetAction::ChangeHp {
                change,
                amount: parse_arg(arg(2), usage)?,
            })
        }
        "stat" => {
            let usage = "#stat <ability> <score>";
            Command::Edit(SheetAction::SetAbilityScore {
                ability: parse_name(arg(1), usage)?,
                score: parse_arg(arg(2), usage)?,
            })
        }
        "toggle" => Command::Edit(SheetAction::ToggleAction(parse_name(
            arg(1),
            "#toggle <action>",
        )?)),
        "confirm" => Command::Confirm,
        "dismiss" => Command::Dismiss,
        "reset" => Command::Edit(SheetAction::ResetTurn),
        "condition" => {
            let condition: Condition = parse_name(arg(1), "#condition <name>")?;
            Command::Edit(SheetAction::ToggleCondition(condition))
        }
        "skill" => {
            let key = arg(1).ok_or("Usage: #skill <key>")?;
            let skill = Skill::from_key(key).ok_or_else(|| format!("unknown skill: {key}"))?;
            Command::Edit(SheetAction::ToggleSkillProficiency(skill))
        }
        "save" => {
            let ability: Ability = parse_name(arg(1), "#save <ability>")?;
            Command::Edit(SheetAction::ToggleSaveProficiency(ability))
        }
        "item" => match arg(1) {
            Some("add") => Command::Edit(SheetAction::AddInventoryItem(rest(&parts, 2))),
            Some("remove") => Command::Edit(SheetAction::RemoveInventoryItem(parse_arg(
                arg(2),
                "#item remove <index>",
            )?)),
            _ => return Err("Usage: #item add <text> | #item remove <index>".to_string()),
        },
        "ability" => match arg(1) {
            Some("add") => {
                let usage = "#ability add <action> <name>";
                let action: ActionKind = parse_name(arg(2), usage)?;
                let name = rest(&parts, 3);
                if name.is_empty() {
                    return Err(format!("Usage: {usage}"));
                }
                Command::Edit(SheetAction::AddEntry {
                    kind: EntryKind::Ability,
                    entry: NewEntry::new(name, action),
                })
            }
            Some("remove") => Command::RemoveEntry {
                kind: EntryKind::Ability,
                entry: parse_entry_ref(arg(2), "#ability remove <index|id>")?,
            },
            _ => return Err("Usage: #ability add|remove ...".to_string()),
        },
        "spell" => match arg(1) {
            Some("add") => {
                let usage = "#spell add <level> <action> <name>";
                let level: u8 = parse_arg(arg(2), usage)?;
                let action: ActionKind = parse_name(arg(3), usage)?;
                let name = rest(&parts, 4);
                if name.is_empty() {
                    return Err(format!("Usage: {usage}"));
                }
                Command::Edit(SheetAction::AddEntry {
                    kind: EntryKind::Spell,
                    entry: NewEntry::new(name, action).with_spell_level(level),
                })
            }
            Some("remove") => Command::RemoveEntry {
                kind: EntryKind::Spell,
                entry: parse_entry_ref(arg(2), "#spell remove <index|id>")?,
            },
            _ => return Err("Usage: #spell add|remove ...".to_string()),
        },
        "use" => {
            let usage = "#use ability|spell <index|id> [slot]";
            let kind: EntryKind = parse_name(arg(1), usage)?;
            let entry = parse_entry_ref(arg(2), usage)?;
            let slot = match arg(3) {
                Some(slot) => Some(slot.parse().map_err(|_| format!("Usage: {usage}"))?),
                None => None,
            };
            Command::Use { kind, entry, slot }
        }
        "slots" => match arg(1) {
            Some("capacity") => {
                let usage = "#slots capacity <level> <delta>";
                Command::Edit(SheetAction::AdjustSlotCapacity {
                    level: parse_arg(arg(2), usage)?,
                    delta: parse_arg(arg(3), usage)?,
                })
            }
            Some("used") => {
                let usage = "#slots used <level> <n>";
                Command::Edit(SheetAction::SetSlotsUsed {
                    level: parse_arg(arg(2), usage)?,
                    used: parse_arg(arg(3), usage)?,
                })
            }
            _ => return Err("Usage: #slots capacity|used <level> <n>".to_string()),
        },
        "details" => {
            let usage = "#details <level> <max hp> <class> <race> <name>";
            let (Some(class), Some(race)) = (arg(3), arg(4)) else {
                return Err(format!("Usage: {usage}"));
            };
            Command::Edit(SheetAction::UpdateDetails(CharacterDetails {
                level: parse_arg(arg(1), usage)?,
                max_hp: parse_arg(arg(2), usage)?,
                class: class.to_string(),
                race: race.to_string(),
                name: rest(&parts, 5),
            }))
        }
        "ac" => Command::Edit(SheetAction::SetArmorClass(parse_arg(arg(1), "#ac <n>")?)),
        "speed" => Command::Edit(SheetAction::SetSpeed(parse_arg(arg(1), "#speed <n>")?)),
        "init" => Command::Edit(SheetAction::SetInitiative(parse_arg(arg(1), "#init <n>")?)),
        "bonus" => Command::Edit(SheetAction::SetExtraAttackBonus(parse_arg(
            arg(1),
            "#bonus <n>",
        )?)),
        "caster" => Command::Edit(SheetAction::SetSpellcastingAbility(parse_name(
            arg(1),
            "#caster <ability>",
        )?)),
        "concentration" => Command::Edit(SheetAction::ToggleConcentration),
        "notes" => Command::Edit(SheetAction::SetNotes(rest(&parts, 1))),
        "roster" => Command::Roster,
        "order" => Command::Order,
        "inspect" => Command::Inspect(parse_character_ref(arg(1))?),
        "back" => Command::Back,
        "npc" => {
            let name = rest(&parts, 1);
            if name.is_empty() {
                return Err("Usage: #npc <name>".to_string());
            }
            Command::Npc(name)
        }
        "view" => Command::View(parse_name(arg(1), "#view sheet|combat|dm")?),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command: {other}. Type #help for help.")),
    };
    Ok(command)
}
