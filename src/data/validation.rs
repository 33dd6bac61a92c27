//! Character form validation
//!
//! These are the rules the character form enforces before handing a record to
//! the store. The store itself accepts anything.

use std::ops::RangeInclusive;
use thiserror::Error;

use super::models::{Character, CharacterClass};

/// Allowed character levels
pub const LEVEL_RANGE: RangeInclusive<i64> = 1..=20;

/// Allowed ability scores
pub const ABILITY_RANGE: RangeInclusive<i64> = 3..=18;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required.")]
    EmptyName,
    #[error("Unknown class '{0}'")]
    UnknownClass(String),
    #[error("Level {0} is outside 1-20")]
    LevelOutOfRange(i64),
    #[error("{ability} {value} is outside 3-18")]
    AbilityOutOfRange { ability: &'static str, value: i64 },
}

/// Check a character against the form rules, reporting the first violation
pub fn validate(character: &Character) -> Result<(), ValidationError> {
    if character.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if CharacterClass::from_stored(&character.char_class).is_none() {
        return Err(ValidationError::UnknownClass(character.char_class.clone()));
    }

    if !LEVEL_RANGE.contains(&character.level) {
        return Err(ValidationError::LevelOutOfRange(character.level));
    }

    for (ability, value) in character.abilities().labeled() {
        if !ABILITY_RANGE.contains(&value) {
            return Err(ValidationError::AbilityOutOfRange { ability, value });
        }
    }

    Ok(())
}
