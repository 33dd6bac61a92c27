//! Utility modules

pub mod paths;
pub mod time;

pub use paths::{default_config_path, default_data_dir, record_file_name};
pub use time::{now_iso, parse_timestamp};
