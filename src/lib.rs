pub mod cli;
pub mod config;
pub mod data;
pub mod util;

pub use config::Config;
pub use data::{
    validate, AbilityScores, Character, CharacterClass, CharacterStore, DuplicatePolicy,
    StoreError, ValidationError,
};
pub use util::{now_iso, parse_timestamp, record_file_name};
