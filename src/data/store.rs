//! File-backed character store
//!
//! One JSON document per character, directly inside the data directory. The
//! whole directory is read into memory on open; every mutation writes through
//! to disk before the in-memory map is updated.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;

use super::models::Character;
use crate::util::paths::{is_record_file, record_file_name};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to create data directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Malformed record file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Record file {0} does not contain a JSON object")]
    NotARecord(PathBuf),
    #[error("Failed to serialize character: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Character not found: {0}")]
    NotFound(String),
    #[error("Character already exists: {0}")]
    AlreadyExists(String),
    #[error("Character name cannot be used as a file name: {0:?}")]
    InvalidName(String),
    #[error("Duplicate character name {name:?} in {first} and {second}")]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// How [`CharacterStore::load`] treats two files holding the same name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Later file (in sorted path order) replaces the earlier one, with a warning
    #[default]
    LastWins,
    /// Fail the load with [`StoreError::DuplicateName`]
    Reject,
}

/// Owns a directory of character records and its in-memory index
#[derive(Debug)]
pub struct CharacterStore {
    data_dir: PathBuf,
    characters: HashMap<String, Character>,
    duplicates: DuplicatePolicy,
}

impl CharacterStore {
    /// Open (creating if needed) a data directory and load every record in it
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(data_dir, DuplicatePolicy::default())
    }

    /// Like [`open`](Self::open), but refuse directories with duplicate names
    pub fn open_strict(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(data_dir, DuplicatePolicy::Reject)
    }

    pub fn open_with(data_dir: impl Into<PathBuf>, duplicates: DuplicatePolicy) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|source| StoreError::CreateDir {
            path: data_dir.clone(),
            source,
        })?;

        let mut store = Self {
            data_dir,
            characters: HashMap::new(),
            duplicates,
        };
        store.load()?;
        Ok(store)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file a character with this name is saved to
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(record_file_name(name))
    }

    /// Rebuild the in-memory map from the record files on disk.
    ///
    /// Records are keyed by the `name` stored inside each file, not by the
    /// file name. A file that is not valid JSON fails the whole load and
    /// leaves the previous map untouched.
    pub fn load(&mut self) -> Result<()> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.is_file() && is_record_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut characters = HashMap::with_capacity(paths.len());
        let mut sources: HashMap<String, PathBuf> = HashMap::with_capacity(paths.len());

        for path in paths {
            let character = read_record(&path)?;

            if let Some(first) = sources.get(&character.name) {
                match self.duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(StoreError::DuplicateName {
                            name: character.name,
                            first: first.clone(),
                            second: path,
                        });
                    }
                    DuplicatePolicy::LastWins => {
                        tracing::warn!(
                            name = %character.name,
                            replaced = %first.display(),
                            path = %path.display(),
                            "Duplicate character name, keeping the later file"
                        );
                    }
                }
            }

            sources.insert(character.name.clone(), path);
            characters.insert(character.name.clone(), character);
        }

        tracing::debug!(
            dir = %self.data_dir.display(),
            count = characters.len(),
            "Loaded characters"
        );
        self.characters = characters;
        Ok(())
    }

    /// Write a character to disk and index it under its name.
    ///
    /// `modified_date` is always replaced with the current time. An existing
    /// record with the same name is overwritten. A record previously saved
    /// under a different name is left alone; use [`rename`](Self::rename).
    pub fn save(&mut self, mut character: Character) -> Result<&Character> {
        if character.name.contains(['/', '\\', '\0']) {
            return Err(StoreError::InvalidName(character.name));
        }

        character.modified_date = crate::util::now_iso();
        let path = self.record_path(&character.name);
        self.write_record(&path, &character)?;

        tracing::debug!(name = %character.name, path = %path.display(), "Saved character");

        let name = character.name.clone();
        self.characters.insert(name.clone(), character);
        Ok(&self.characters[&name])
    }

    /// Remove a character's file and its in-memory entry.
    ///
    /// A missing file is not an error; a name that is not in the store is,
    /// and leaves the directory untouched.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        if !self.characters.contains_key(name) {
            return Err(StoreError::NotFound(name.to_string()));
        }

        remove_file_if_exists(&self.record_path(name))?;
        self.characters.remove(name);

        tracing::debug!(name = %name, "Deleted character");
        Ok(())
    }

    /// Look up a character by name
    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters.get(name)
    }

    /// All characters, sorted case-insensitively by name
    pub fn list(&self) -> Vec<&Character> {
        let mut characters: Vec<&Character> = self.characters.values().collect();
        characters.sort_by_cached_key(|c| (c.name.to_lowercase(), c.name.clone()));
        characters
    }

    /// Save an edited character under a new name and drop the old record.
    ///
    /// `created_date` is carried over from the old record. Fails without
    /// touching anything if `old_name` is unknown or the new name, or the file
    /// it would be written to, already belongs to a different character.
    pub fn rename(&mut self, old_name: &str, mut character: Character) -> Result<&Character> {
        let previous = self
            .characters
            .get(old_name)
            .ok_or_else(|| StoreError::NotFound(old_name.to_string()))?;
        character.carry_created_date(previous);

        if character.name == old_name {
            return self.save(character);
        }
        let old_path = self.record_path(old_name);
        let new_path = self.record_path(&character.name);
        let taken = self.characters.contains_key(&character.name)
            || self
                .characters
                .keys()
                .any(|name| name != old_name && self.record_path(name) == new_path);
        if taken {
            return Err(StoreError::AlreadyExists(character.name));
        }

        let new_name = character.name.clone();
        let same_file = old_path == new_path;

        self.save(character)?;
        if !same_file {
            remove_file_if_exists(&old_path)?;
        }
        self.characters.remove(old_name);

        tracing::debug!(from = %old_name, to = %new_name, "Renamed character");
        Ok(&self.characters[&new_name])
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Write through a temp file in the data directory so a failed write
    /// never truncates the existing record
    fn write_record(&self, path: &Path, character: &Character) -> Result<()> {
        let contents = serde_json::to_string_pretty(character)?;

        let mut tmp = NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn read_record(path: &Path) -> Result<Character> {
    let contents = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    Character::from_value(&value).ok_or_else(|| StoreError::NotARecord(path.to_path_buf()))
}

fn remove_file_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
