//! Configuration types for Complaint Drafter
//!
//! Defines:
//! - `Settings` - Global application settings (.cdraft/config.toml)
//! - Related sub-sections

use std::path::PathBuf;
use std::time::Duration;

use cdraft_core::{ExportFormat, DEFAULT_DATE_FORMAT};
use serde::{Deserialize, Serialize};

/// Application settings (.cdraft/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub timing: TimingSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub document: DocumentSettings,
}

/// Simulated processing delays for the two automatic transitions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingSettings {
    /// Delay before analysis results (sample counts) appear
    #[serde(default = "default_analysis_delay_ms")]
    pub analysis_delay_ms: u64,

    /// Delay before the generated draft appears
    #[serde(default = "default_generation_delay_ms")]
    pub generation_delay_ms: u64,
}

impl TimingSettings {
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            analysis_delay_ms: default_analysis_delay_ms(),
            generation_delay_ms: default_generation_delay_ms(),
        }
    }
}

/// Where and how drafts are saved and exported
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Output directory for saved and exported drafts
    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,

    /// Format used when `export` is requested without one
    #[serde(default)]
    pub default_format: ExportFormat,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            default_format: ExportFormat::default(),
        }
    }
}

/// Generated document options
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentSettings {
    /// strftime format for the signature date
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

fn default_analysis_delay_ms() -> u64 {
    2500
}

fn default_generation_delay_ms() -> u64 {
    3000
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_export_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("complaint-drafter")
        .join("drafts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.timing.analysis_delay_ms, 2500);
        assert_eq!(settings.timing.generation_delay_ms, 3000);
        assert_eq!(settings.export.default_format, ExportFormat::PlainText);
        assert_eq!(settings.document.date_format, "%B %-d, %Y");
        assert!(settings.export.directory.ends_with("complaint-drafter/drafts"));
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[timing]
analysis_delay_ms = 10

[export]
default_format = "md"
"#,
        )
        .unwrap();
        assert_eq!(settings.timing.analysis_delay_ms, 10);
        assert_eq!(settings.timing.generation_delay_ms, 3000);
        assert_eq!(settings.export.default_format, ExportFormat::Markdown);
        assert_eq!(settings.timing.analysis_delay(), Duration::from_millis(10));
    }
}
