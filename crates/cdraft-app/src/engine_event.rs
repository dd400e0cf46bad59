//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON.

use std::path::PathBuf;

use cdraft_core::{ComplaintSection, Count, DraftedComplaint, ExportFormat, NumberingIssue, SectionId};

use crate::state::{Notice, View};

/// Domain events emitted by the Engine.
///
/// Events are broadcast after each message processing cycle, so subscribers
/// see a consistent view of state changes.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Wizard Flow
    // ─────────────────────────────────────────────────────────
    /// The wizard moved to another view
    ViewChanged { from: View, to: View },

    /// The count list changed (loaded, toggled, added, edited or deleted)
    ///
    /// `counts` is the review presentation: edited counts carry no key facts
    /// or supporting docs.
    CountsUpdated {
        counts: Vec<Count>,
        edited: Vec<u32>,
        generate_enabled: bool,
    },

    // ─────────────────────────────────────────────────────────
    // Draft Editor
    // ─────────────────────────────────────────────────────────
    /// Generation finished and the editor is open
    DraftReady { document: Box<DraftedComplaint> },

    /// A committed edit changed one section
    SectionUpdated { section: Box<ComplaintSection> },

    /// A section was selected and should be scrolled into view
    SectionSelected { id: SectionId },

    /// Adjacent counts no longer number continuously
    NumberingDrift { issues: Vec<NumberingIssue> },

    // ─────────────────────────────────────────────────────────
    // Feedback
    // ─────────────────────────────────────────────────────────
    /// A message was not valid in the current state
    Rejected { reason: String },

    /// A new notification is showing
    Notice { notice: Notice },

    // ─────────────────────────────────────────────────────────
    // Document Store
    // ─────────────────────────────────────────────────────────
    DraftSaved { path: PathBuf },

    DraftExported { path: PathBuf, format: ExportFormat },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ViewChanged { .. } => "view_changed",
            Self::CountsUpdated { .. } => "counts_updated",
            Self::DraftReady { .. } => "draft_ready",
            Self::SectionUpdated { .. } => "section_updated",
            Self::SectionSelected { .. } => "section_selected",
            Self::NumberingDrift { .. } => "numbering_drift",
            Self::Rejected { .. } => "rejected",
            Self::Notice { .. } => "notice",
            Self::DraftSaved { .. } => "draft_saved",
            Self::DraftExported { .. } => "draft_exported",
            Self::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_labels() {
        let event = EngineEvent::ViewChanged {
            from: View::Homepage,
            to: View::Analyzing,
        };
        assert_eq!(event.event_type(), "view_changed");
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");
        assert_eq!(
            EngineEvent::Rejected {
                reason: "nope".into()
            }
            .event_type(),
            "rejected"
        );
    }
}
