use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::DuplicatePolicy;
use crate::util::paths::{default_config_path, default_data_dir};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one JSON file per character
    pub data_dir: PathBuf,
    /// What to do when two record files carry the same name
    pub duplicates: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            duplicates: DuplicatePolicy::LastWins,
        }
    }
}

/// TOML representation of the `[storage]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlStorageConfig {
    pub data_dir: Option<PathBuf>,
    pub strict_load: Option<bool>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub storage: Option<TomlStorageConfig>,
}

impl Config {
    /// Load the config file at its default location, merging with defaults
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(&default_config_path())
    }

    /// Load a config file, merging with defaults.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is an
    /// error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config file contents, merging with defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(storage) = toml_config.storage {
            if let Some(data_dir) = storage.data_dir {
                config.data_dir = data_dir;
            }
            if let Some(strict) = storage.strict_load {
                config.duplicates = if strict {
                    DuplicatePolicy::Reject
                } else {
                    DuplicatePolicy::LastWins
                };
            }
        }

        Ok(config)
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = dir;
        self
    }
}
