//! Path utilities for charsheet data and config locations

use std::path::{Path, PathBuf};

/// Directory name used for character records when nothing else is configured
pub const DEFAULT_DATA_DIR: &str = "character_data";

/// Extension of every record file (without the leading dot)
pub const RECORD_EXTENSION: &str = "json";

/// Character substituted for spaces when deriving a record file name
const SPACE_SUBSTITUTE: char = '_';

/// Get the default data directory (`./character_data`, relative to the CWD)
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Get the default config file path (`<config dir>/charsheet/config.toml`)
///
/// Falls back to `./charsheet.toml` on platforms without a config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("charsheet").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("charsheet.toml"))
}

/// Derive the record file name for a character name.
///
/// Spaces become underscores, case is preserved, and the record extension
/// is appended: `"Sir Lancelot"` -> `"Sir_Lancelot.json"`.
pub fn record_file_name(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c == ' ' { SPACE_SUBSTITUTE } else { c })
        .collect();
    format!("{}.{}", stem, RECORD_EXTENSION)
}

/// Whether a path looks like a record file (`*.json`).
///
/// Matches on the file name suffix rather than `Path::extension` so the
/// record of an empty-named character (`.json`) is still picked up.
pub fn is_record_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(RECORD_EXTENSION))
        .is_some_and(|stem| stem.ends_with('.'))
}
