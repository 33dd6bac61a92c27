//! Command-line front end
//!
//! A thin layer over [`CharacterStore`]: parse arguments, validate form input,
//! call the store, and print the result. Listing output is always re-read
//! from the store after a mutation.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::data::{
    validate, AbilityScores, Character, CharacterClass, CharacterStore, StoreError,
    DEFAULT_LEVEL,
};
use crate::util::parse_timestamp;

#[derive(Debug, Parser)]
#[command(name = "charsheet")]
#[command(about = "Manage tabletop RPG character sheets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the character files (overrides the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all characters, sorted by name
    List,
    /// Show one character's full sheet
    Show {
        /// Character name
        name: String,
    },
    /// Create a new character
    New {
        /// Character name
        name: String,
        /// Character class
        #[arg(short, long)]
        class: CharacterClass,
        /// Character level (1-20)
        #[arg(short, long, default_value_t = DEFAULT_LEVEL)]
        level: i64,
        #[command(flatten)]
        abilities: AbilityArgs,
    },
    /// Edit an existing character
    Edit {
        /// Current character name
        name: String,
        /// Rename the character
        #[arg(long = "name", value_name = "NEW_NAME")]
        new_name: Option<String>,
        /// Character class
        #[arg(short, long)]
        class: Option<CharacterClass>,
        /// Character level (1-20)
        #[arg(short, long)]
        level: Option<i64>,
        #[command(flatten)]
        abilities: AbilityArgs,
    },
    /// Delete a character and its file
    Delete {
        /// Character name
        name: String,
    },
    /// List the available character classes
    Classes,
}

/// Ability score flags shared by `new` and `edit` (3-18 each)
#[derive(Debug, Clone, Default, Args)]
pub struct AbilityArgs {
    #[arg(long = "str", value_name = "N")]
    pub strength: Option<i64>,
    #[arg(long = "dex", value_name = "N")]
    pub dexterity: Option<i64>,
    #[arg(long = "con", value_name = "N")]
    pub constitution: Option<i64>,
    #[arg(long = "int", value_name = "N")]
    pub intelligence: Option<i64>,
    #[arg(long = "wis", value_name = "N")]
    pub wisdom: Option<i64>,
    #[arg(long = "cha", value_name = "N")]
    pub charisma: Option<i64>,
}

impl AbilityArgs {
    /// Fill in the given flags on top of `base`
    pub fn apply(&self, base: AbilityScores) -> AbilityScores {
        AbilityScores {
            strength: self.strength.unwrap_or(base.strength),
            dexterity: self.dexterity.unwrap_or(base.dexterity),
            constitution: self.constitution.unwrap_or(base.constitution),
            intelligence: self.intelligence.unwrap_or(base.intelligence),
            wisdom: self.wisdom.unwrap_or(base.wisdom),
            charisma: self.charisma.unwrap_or(base.charisma),
        }
    }
}

impl Cli {
    /// Resolve the effective configuration: config file, then CLI overrides
    pub fn resolve_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load(path),
            None => Config::load_default(),
        }
        .context("Failed to load configuration")?;

        Ok(match &self.data_dir {
            Some(dir) => config.with_data_dir(dir.clone()),
            None => config,
        })
    }
}

/// Run a parsed command line, writing user-facing output to `out`
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    // Needs no store; don't create the data directory for it
    if matches!(cli.command, Command::Classes) {
        return print_classes(out);
    }

    let config = cli.resolve_config()?;
    let mut store = CharacterStore::open_with(&config.data_dir, config.duplicates)
        .with_context(|| format!("Failed to open {}", config.data_dir.display()))?;

    execute(&mut store, cli.command, out)
}

/// Execute one command against an open store
pub fn execute(store: &mut CharacterStore, command: Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::List => print_list(store, out),
        Command::Show { name } => {
            let character = store
                .get(&name)
                .ok_or_else(|| StoreError::NotFound(name.clone()))?;
            print_sheet(character, out)
        }
        Command::New {
            name,
            class,
            level,
            abilities,
        } => {
            if store.get(&name).is_some() {
                bail!(
                    "Character '{}' already exists; use `charsheet edit` to change it",
                    name
                );
            }

            let character = Character::new(
                name,
                class.as_str(),
                level,
                abilities.apply(AbilityScores::default()),
            );
            validate(&character)?;

            let saved = store.save(character)?;
            writeln!(out, "Saved {}", saved.name)?;
            print_count(store, out)
        }
        Command::Edit {
            name,
            new_name,
            class,
            level,
            abilities,
        } => {
            let existing = store
                .get(&name)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(name.clone()))?;

            let mut updated = Character::new(
                new_name.unwrap_or_else(|| existing.name.clone()),
                class
                    .or_else(|| CharacterClass::from_stored(&existing.char_class))
                    .unwrap_or(CharacterClass::ALL[0])
                    .as_str(),
                level.unwrap_or(existing.level),
                abilities.apply(existing.abilities()),
            );
            updated.carry_created_date(&existing);
            validate(&updated)?;

            let saved = if updated.name == existing.name {
                store.save(updated)?
            } else {
                store.rename(&existing.name, updated)?
            };
            writeln!(out, "Saved {}", saved.name)?;
            print_count(store, out)
        }
        Command::Delete { name } => {
            store.delete(&name)?;
            writeln!(out, "Deleted {}", name)?;
            print_count(store, out)
        }
        Command::Classes => print_classes(out),
    }
}

/// One-line summary used by `list`
pub fn summary_line(character: &Character) -> String {
    format!(
        "{} -- {} (Level {})",
        character.name, character.char_class, character.level
    )
}

fn print_list(store: &CharacterStore, out: &mut dyn Write) -> Result<()> {
    let characters = store.list();
    if characters.is_empty() {
        writeln!(
            out,
            "No characters yet. Use `charsheet new` to create one."
        )?;
        return Ok(());
    }

    for character in characters {
        writeln!(out, "{}", summary_line(character))?;
    }
    Ok(())
}

fn print_classes(out: &mut dyn Write) -> Result<()> {
    for class in CharacterClass::ALL {
        writeln!(out, "{}", class)?;
    }
    Ok(())
}

fn print_sheet(character: &Character, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", summary_line(character))?;

    let stats: Vec<String> = character
        .abilities()
        .labeled()
        .iter()
        .map(|(label, value)| format!("{} {}", label, value))
        .collect();
    writeln!(out, "{}", stats.join("  "))?;

    writeln!(out, "Created:  {}", display_date(&character.created_date))?;
    writeln!(out, "Modified: {}", display_date(&character.modified_date))?;
    Ok(())
}

fn print_count(store: &CharacterStore, out: &mut dyn Write) -> Result<()> {
    let count = store.list().len();
    let noun = if count == 1 { "character" } else { "characters" };
    writeln!(out, "{} {} in {}", count, noun, store.data_dir().display())?;
    Ok(())
}

fn display_date(value: &str) -> String {
    parse_timestamp(value)
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| value.to_string())
}
