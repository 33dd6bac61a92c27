//! Data persistence layer for charsheet
//!
//! This module provides the character record, its file-backed store, and the
//! form validation rules applied before saving.

mod models;
mod store;
pub mod validation;

pub use models::{AbilityScores, Character, CharacterClass, DEFAULT_ABILITY_SCORE, DEFAULT_LEVEL};
pub use store::{CharacterStore, DuplicatePolicy, Result, StoreError};
pub use validation::{validate, ValidationError};
