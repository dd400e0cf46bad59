//! Headless mode - NDJSON event output
//!
//! Commands are read from stdin (see [`crate::commands`]) and every state
//! change the engine reports is written to stdout as one JSON object per line.
//! Each object has an "event" field naming its type and a millisecond
//! "timestamp".
//!
//! # Example Output
//!
//! ```json
//! {"event":"view_changed","from":"homepage","to":"analyzing","timestamp":1792300000000}
//! {"event":"view_changed","from":"analyzing","to":"counts-review","timestamp":1792300002500}
//! {"event":"counts","counts":[...],"edited":[],"generate_enabled":true,"timestamp":1792300002500}
//! ```

pub mod runner;

use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::error;

use cdraft_app::{EngineEvent, NoticeLevel, View};
use cdraft_core::{
    Blueprint, ComplaintSection, Count, DraftedComplaint, ExportFormat, NumberingIssue, SectionId,
};

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Runner is accepting commands
    Ready {
        output_dir: String,
        log_file: Option<String>,
        timestamp: i64,
    },

    /// Blueprint library listing
    Blueprints {
        blueprints: Vec<Blueprint>,
        timestamp: i64,
    },

    ViewChanged { from: View, to: View, timestamp: i64 },

    /// Counts under review after any change
    ///
    /// Edited counts are listed without key facts or supporting docs.
    Counts {
        counts: Vec<Count>,
        edited: Vec<u32>,
        generate_enabled: bool,
        timestamp: i64,
    },

    /// The generated draft, with unresolved placeholders
    DraftReady {
        document: Box<DraftedComplaint>,
        placeholders: Vec<String>,
        timestamp: i64,
    },

    SectionUpdated {
        section: Box<ComplaintSection>,
        timestamp: i64,
    },

    SectionSelected { section: SectionId, timestamp: i64 },

    NumberingDrift {
        issues: Vec<NumberingIssue>,
        timestamp: i64,
    },

    /// Rendered plain text of the current draft
    Document { text: String, timestamp: i64 },

    /// A command or message was not accepted
    Rejected { reason: String, timestamp: i64 },

    Notice {
        level: NoticeLevel,
        message: String,
        timestamp: i64,
    },

    Saved { path: String, timestamp: i64 },

    Exported {
        path: String,
        format: ExportFormat,
        timestamp: i64,
    },

    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // Write to stdout with newline (NDJSON format)
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn ready(output_dir: &Path, log_file: Option<&Path>) -> Self {
        Self::Ready {
            output_dir: output_dir.display().to_string(),
            log_file: log_file.map(|p| p.display().to_string()),
            timestamp: Self::now(),
        }
    }

    pub fn blueprints(blueprints: Vec<Blueprint>) -> Self {
        Self::Blueprints {
            blueprints,
            timestamp: Self::now(),
        }
    }

    pub fn document(text: String) -> Self {
        Self::Document {
            text,
            timestamp: Self::now(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
            timestamp: Self::now(),
        }
    }

    /// Convert an engine event into its NDJSON form
    pub fn from_engine_event(event: EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::ViewChanged { from, to } => Self::ViewChanged {
                from,
                to,
                timestamp,
            },
            EngineEvent::CountsUpdated {
                counts,
                edited,
                generate_enabled,
            } => Self::Counts {
                counts,
                edited,
                generate_enabled,
                timestamp,
            },
            EngineEvent::DraftReady { document } => Self::DraftReady {
                placeholders: document.placeholders(),
                document,
                timestamp,
            },
            EngineEvent::SectionUpdated { section } => Self::SectionUpdated { section, timestamp },
            EngineEvent::SectionSelected { id } => Self::SectionSelected {
                section: id,
                timestamp,
            },
            EngineEvent::NumberingDrift { issues } => Self::NumberingDrift { issues, timestamp },
            EngineEvent::Rejected { reason } => Self::Rejected { reason, timestamp },
            EngineEvent::Notice { notice } => Self::Notice {
                level: notice.level,
                message: notice.message,
                timestamp,
            },
            EngineEvent::DraftSaved { path } => Self::Saved {
                path: path.display().to_string(),
                timestamp,
            },
            EngineEvent::DraftExported { path, format } => Self::Exported {
                path: path.display().to_string(),
                format,
                timestamp,
            },
            EngineEvent::Shutdown => Self::Shutdown { timestamp },
        }
    }
}
