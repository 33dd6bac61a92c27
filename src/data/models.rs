//! Data models for character records

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::util::time::now_iso;

/// Level given to records that do not specify one
pub const DEFAULT_LEVEL: i64 = 1;

/// Ability score given to records that do not specify one
pub const DEFAULT_ABILITY_SCORE: i64 = 10;

/// Character class offered by the character form.
///
/// The record itself stores the class as free text; this closed set is only
/// used for input parsing and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

impl CharacterClass {
    /// Every class, in display order
    pub const ALL: [CharacterClass; 12] = [
        CharacterClass::Barbarian,
        CharacterClass::Bard,
        CharacterClass::Cleric,
        CharacterClass::Druid,
        CharacterClass::Fighter,
        CharacterClass::Monk,
        CharacterClass::Paladin,
        CharacterClass::Ranger,
        CharacterClass::Rogue,
        CharacterClass::Sorcerer,
        CharacterClass::Warlock,
        CharacterClass::Wizard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterClass::Barbarian => "Barbarian",
            CharacterClass::Bard => "Bard",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Druid => "Druid",
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Monk => "Monk",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Sorcerer => "Sorcerer",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Wizard => "Wizard",
        }
    }

    /// Look up a class by its exact stored spelling
    pub fn from_stored(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.as_str() == value)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterClass {
    type Err = String;

    /// Case-insensitive parse, for user input
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown character class: {}", s))
    }
}

/// The six ability scores, used when constructing a [`Character`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityScores {
    pub strength: i64,
    pub dexterity: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub charisma: i64,
}

impl AbilityScores {
    /// Scores in sheet order (STR, DEX, CON, INT, WIS, CHA) with their labels
    pub fn labeled(&self) -> [(&'static str, i64); 6] {
        [
            ("STR", self.strength),
            ("DEX", self.dexterity),
            ("CON", self.constitution),
            ("INT", self.intelligence),
            ("WIS", self.wisdom),
            ("CHA", self.charisma),
        ]
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: DEFAULT_ABILITY_SCORE,
            dexterity: DEFAULT_ABILITY_SCORE,
            constitution: DEFAULT_ABILITY_SCORE,
            intelligence: DEFAULT_ABILITY_SCORE,
            wisdom: DEFAULT_ABILITY_SCORE,
            charisma: DEFAULT_ABILITY_SCORE,
        }
    }
}

/// One character sheet.
///
/// Serializes to the flat on-disk document; field order here is the key order
/// written to record files. Nothing is range-checked at this level, see
/// [`crate::data::validation`] for the form rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    /// Unique key within a store
    pub name: String,
    /// Class name, stored under the `class` key
    #[serde(rename = "class")]
    pub char_class: String,
    pub level: i64,
    pub strength: i64,
    pub dexterity: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub charisma: i64,
    /// Set when the record is first built; carried forward on edits
    pub created_date: String,
    /// Overwritten by the store on every save
    pub modified_date: String,
}

impl Character {
    /// Create a new character with both dates set to now
    pub fn new(
        name: impl Into<String>,
        char_class: impl Into<String>,
        level: i64,
        abilities: AbilityScores,
    ) -> Self {
        let now = now_iso();
        Self {
            name: name.into(),
            char_class: char_class.into(),
            level,
            strength: abilities.strength,
            dexterity: abilities.dexterity,
            constitution: abilities.constitution,
            intelligence: abilities.intelligence,
            wisdom: abilities.wisdom,
            charisma: abilities.charisma,
            created_date: now.clone(),
            modified_date: now,
        }
    }

    pub fn abilities(&self) -> AbilityScores {
        AbilityScores {
            strength: self.strength,
            dexterity: self.dexterity,
            constitution: self.constitution,
            intelligence: self.intelligence,
            wisdom: self.wisdom,
            charisma: self.charisma,
        }
    }

    /// Copy `created_date` from an earlier version of this record
    pub fn carry_created_date(&mut self, previous: &Character) {
        self.created_date = previous.created_date.clone();
    }

    /// Rebuild a character from a key/value document.
    ///
    /// Never fails: a key that is missing or holds the wrong JSON type falls
    /// back to its default (empty text, level 1, ability 10, dates = now).
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let text = |key: &str| {
            map.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let int = |key: &str, default: i64| {
            map.get(key)
                .and_then(Value::as_i64)
                .unwrap_or(default)
        };
        let date = |key: &str| {
            map.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(now_iso)
        };

        Self {
            name: text("name"),
            char_class: text("class"),
            level: int("level", DEFAULT_LEVEL),
            strength: int("strength", DEFAULT_ABILITY_SCORE),
            dexterity: int("dexterity", DEFAULT_ABILITY_SCORE),
            constitution: int("constitution", DEFAULT_ABILITY_SCORE),
            intelligence: int("intelligence", DEFAULT_ABILITY_SCORE),
            wisdom: int("wisdom", DEFAULT_ABILITY_SCORE),
            charisma: int("charisma", DEFAULT_ABILITY_SCORE),
            created_date: date("created_date"),
            modified_date: date("modified_date"),
        }
    }

    /// Rebuild a character from any JSON value; `None` unless it is an object
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(Self::from_map)
    }
}
