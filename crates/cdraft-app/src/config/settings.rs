//! Settings parser for .cdraft/config.toml

use super::types::Settings;
use cdraft_core::prelude::*;
use cdraft_core::ContentGenerator;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const CDRAFT_DIR: &str = ".cdraft";

/// Path of the settings file under `base_path`
pub fn config_path(base_path: &Path) -> PathBuf {
    base_path.join(CDRAFT_DIR).join(CONFIG_FILENAME)
}

/// Load settings from `<base>/.cdraft/config.toml`
///
/// A missing file yields defaults. An unreadable or invalid file is logged and
/// also yields defaults.
pub fn load_settings(base_path: &Path) -> Settings {
    let config_path = config_path(base_path);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match load_settings_file(&config_path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path);
            settings
        }
        Err(e) => {
            warn!("Failed to load {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Load settings from an explicit file; errors are returned, not defaulted
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let mut settings: Settings = toml::from_str(&content)?;

    if let Err(e) = ContentGenerator::new(settings.document.date_format.clone()) {
        warn!("{}; falling back to default date format", e);
        settings.document.date_format = Settings::default().document.date_format;
    }

    Ok(settings)
}

/// Create a commented default config in `<base>/.cdraft/`, once
pub fn init_config_dir(base_path: &Path) -> Result<()> {
    let cdraft_dir = base_path.join(CDRAFT_DIR);

    if !cdraft_dir.exists() {
        std::fs::create_dir_all(&cdraft_dir)
            .map_err(|e| Error::config(format!("Failed to create .cdraft dir: {}", e)))?;
    }

    let config_path = cdraft_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Complaint Drafter Configuration

[timing]
analysis_delay_ms = 2500     # Simulated case analysis time
generation_delay_ms = 3000   # Simulated drafting time

[export]
# directory = "/path/to/drafts"   # Defaults to the local data dir
default_format = "txt"            # txt, md or json

[document]
date_format = "%B %-d, %Y"        # Signature block date
"#;
        std::fs::write(&config_path, default_content)?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}
