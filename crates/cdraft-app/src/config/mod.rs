//! Configuration file parsing for Complaint Drafter
//!
//! Supports:
//! - `.cdraft/config.toml` - Global settings

pub mod settings;
pub mod types;

pub use settings::{config_path, init_config_dir, load_settings, load_settings_file};
pub use types::*;
