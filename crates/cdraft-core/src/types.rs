//! Core domain types for the drafting wizard

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named template choice that kicks off the drafting wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Human readable "last used" label, e.g. "2 days ago"
    pub last_used: String,
}

/// A single legal claim under consideration for the drafted complaint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub selected: bool,
    #[serde(default)]
    pub key_facts: Vec<String>,
    #[serde(default)]
    pub supporting_docs: Vec<String>,
    #[serde(default)]
    pub is_custom: bool,
}

impl Count {
    /// Title given to counts created through "add custom count"
    pub const CUSTOM_TITLE: &'static str = "Custom Claim";

    /// Create a user-authored count with no AI-derived support data
    pub fn custom(id: u32) -> Self {
        Self {
            id,
            title: Self::CUSTOM_TITLE.to_string(),
            description: String::new(),
            selected: true,
            key_facts: Vec::new(),
            supporting_docs: Vec::new(),
            is_custom: true,
        }
    }
}

/// Output format for draft export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    #[serde(alias = "txt", alias = "text")]
    PlainText,
    #[serde(alias = "md")]
    Markdown,
    Json,
}

impl ExportFormat {
    /// File extension used for exported files
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::PlainText => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" | "plaintext" => Ok(ExportFormat::PlainText),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            other => Err(Error::UnknownExportFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_count_defaults() {
        let count = Count::custom(9);
        assert_eq!(count.id, 9);
        assert_eq!(count.title, "Custom Claim");
        assert!(count.selected);
        assert!(count.is_custom);
        assert!(count.key_facts.is_empty());
        assert!(count.supporting_docs.is_empty());
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::PlainText);
        assert_eq!("Markdown".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!(" json ".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "docx".parse::<ExportFormat>(),
            Err(Error::UnknownExportFormat(f)) if f == "docx"
        ));
    }

    #[test]
    fn test_export_format_toml_aliases() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: ExportFormat,
        }
        let w: Wrapper = toml::from_str(r#"format = "md""#).unwrap();
        assert_eq!(w.format, ExportFormat::Markdown);
        let w: Wrapper = toml::from_str(r#"format = "txt""#).unwrap();
        assert_eq!(w.format, ExportFormat::PlainText);
    }

    #[test]
    fn test_count_deserializes_without_optional_fields() {
        let json = r#"{"id":1,"title":"Negligence","description":"d","selected":true}"#;
        let count: Count = serde_json::from_str(json).unwrap();
        assert!(!count.is_custom);
        assert!(count.key_facts.is_empty());
    }
}
