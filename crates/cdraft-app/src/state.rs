//! Application state (Model in TEA pattern)

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;

use cdraft_core::prelude::*;
use cdraft_core::{Blueprint, Clock, ContentGenerator, DraftedComplaint, ExportFormat, SystemClock};

use crate::config::Settings;
use crate::counts::CountList;
use crate::editor::SectionEditor;

/// Current wizard view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Blueprint selection
    #[default]
    Homepage,

    /// Simulated case analysis in progress
    Analyzing,

    /// Proposed counts can be selected, added, edited and deleted
    CountsReview,

    /// Simulated drafting in progress
    Generating,

    /// Steady state: the generated complaint is open for editing
    DraftEditor,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Homepage => "homepage",
            View::Analyzing => "analyzing",
            View::CountsReview => "counts-review",
            View::Generating => "generating",
            View::DraftEditor => "draft-editor",
        };
        f.write_str(name)
    }
}

/// Identifier of a scheduled timer operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OperationId(pub u64);

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Analysis,
    Generation,
}

/// A delayed transition waiting for its timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingOperation {
    pub id: OperationId,
    pub kind: OperationKind,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Transient user-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Record of the last successful write to the document store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    pub path: PathBuf,
    /// `None` for a saved draft, the format for an export
    pub format: Option<ExportFormat>,
    /// Running count of completed writes
    pub sequence: u64,
}

/// Complete application state (the Model in TEA)
pub struct AppState {
    /// Current wizard view
    pub view: View,

    /// Blueprint chosen on the homepage
    pub blueprint: Option<Blueprint>,

    /// Counts under review, with the hand-edited set
    pub counts: CountList,

    /// Present once generation completes
    pub editor: Option<SectionEditor>,

    /// The in-flight timer, if any
    pub pending: Option<PendingOperation>,

    /// Notification shown until dismissed or replaced
    pub notice: Option<Notice>,

    /// Last save or export that completed
    pub last_write: Option<WriteRecord>,

    /// Saves and exports handed to the document store, not yet reported back
    pub writes_in_flight: usize,

    pub settings: Settings,

    pub generator: ContentGenerator,

    clock: Arc<dyn Clock>,

    next_operation_id: u64,

    write_sequence: u64,

    disposed: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create state from loaded settings
    pub fn with_settings(settings: Settings) -> Self {
        let generator = ContentGenerator::new(settings.document.date_format.clone())
            .unwrap_or_else(|e| {
                warn!("{}; using default date format", e);
                ContentGenerator::default()
            });

        Self {
            view: View::default(),
            blueprint: None,
            counts: CountList::default(),
            editor: None,
            pending: None,
            notice: None,
            last_write: None,
            writes_in_flight: 0,
            settings,
            generator,
            clock: Arc::new(SystemClock),
            next_operation_id: 0,
            write_sequence: 0,
            disposed: false,
        }
    }

    /// Replace the clock used to date generated drafts
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Generate is enabled iff at least one count is selected
    pub fn generate_enabled(&self) -> bool {
        self.counts.any_selected()
    }

    /// `(selected, total)` for the counts under review
    pub fn selection_summary(&self) -> (usize, usize) {
        (self.counts.selected_len(), self.counts.len())
    }

    /// A timer is pending or a document store write has not reported back
    pub fn is_busy(&self) -> bool {
        self.pending.is_some() || self.writes_in_flight > 0
    }

    pub fn draft(&self) -> Option<&DraftedComplaint> {
        self.editor.as_ref().map(|e| e.draft())
    }

    /// Register a new timer operation, replacing any previous one
    pub fn begin_operation(&mut self, kind: OperationKind, delay: Duration) -> PendingOperation {
        self.next_operation_id += 1;
        let operation = PendingOperation {
            id: OperationId(self.next_operation_id),
            kind,
            delay,
        };
        if let Some(stale) = self.pending.replace(operation) {
            debug!("Replacing pending operation {}", stale.id);
        }
        operation
    }

    /// Take the pending operation if `id` is the current one
    ///
    /// Returns `None` for stale or unknown ids.
    pub fn complete_pending(&mut self, id: OperationId) -> Option<PendingOperation> {
        match self.pending {
            Some(op) if op.id == id => self.pending.take(),
            _ => None,
        }
    }

    pub fn set_notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            message: message.into(),
        });
    }

    pub fn begin_write(&mut self) {
        self.writes_in_flight += 1;
    }

    /// A write reported back, successfully or not
    pub fn finish_write(&mut self) {
        self.writes_in_flight = self.writes_in_flight.saturating_sub(1);
    }

    pub fn record_write(&mut self, path: PathBuf, format: Option<ExportFormat>) {
        self.write_sequence += 1;
        self.last_write = Some(WriteRecord {
            path,
            format,
            sequence: self.write_sequence,
        });
    }

    /// Drop back to the homepage, discarding the review session
    pub fn reset_to_homepage(&mut self) {
        self.view = View::Homepage;
        self.blueprint = None;
        self.counts = CountList::default();
        self.pending = None;
    }

    /// Mark the state disposed; returns the operation that must be cancelled
    pub fn dispose(&mut self) -> Option<PendingOperation> {
        self.disposed = true;
        self.pending.take()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn should_quit(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_display_is_kebab_case() {
        assert_eq!(View::CountsReview.to_string(), "counts-review");
        assert_eq!(View::DraftEditor.to_string(), "draft-editor");
        assert_eq!(
            serde_json::to_string(&View::CountsReview).unwrap(),
            "\"counts-review\""
        );
    }

    #[test]
    fn test_new_state_starts_on_homepage() {
        let state = AppState::new();
        assert_eq!(state.view, View::Homepage);
        assert!(state.pending.is_none());
        assert!(!state.generate_enabled());
        assert!(!state.should_quit());
    }

    #[test]
    fn test_operation_ids_increase() {
        let mut state = AppState::new();
        let a = state.begin_operation(OperationKind::Analysis, Duration::ZERO);
        let b = state.begin_operation(OperationKind::Generation, Duration::ZERO);
        assert!(b.id > a.id);
        assert_eq!(state.pending, Some(b));
    }

    #[test]
    fn test_complete_pending_ignores_stale_ids() {
        let mut state = AppState::new();
        let stale = state.begin_operation(OperationKind::Analysis, Duration::ZERO);
        let current = state.begin_operation(OperationKind::Analysis, Duration::ZERO);

        assert!(state.complete_pending(stale.id).is_none());
        assert_eq!(state.complete_pending(current.id), Some(current));
        assert!(state.complete_pending(current.id).is_none());
    }

    #[test]
    fn test_dispose_takes_pending() {
        let mut state = AppState::new();
        let op = state.begin_operation(OperationKind::Generation, Duration::from_secs(3));

        assert_eq!(state.dispose(), Some(op));
        assert!(state.is_disposed());
        assert!(state.pending.is_none());
    }

    #[test]
    fn test_invalid_date_format_uses_default_generator() {
        let mut settings = Settings::default();
        settings.document.date_format = "%!".to_string();
        let state = AppState::with_settings(settings);
        assert_eq!(state.generator.date_format(), "%B %-d, %Y");
    }

    #[test]
    fn test_busy_while_pending_or_writing() {
        let mut state = AppState::new();
        assert!(!state.is_busy());

        let op = state.begin_operation(OperationKind::Analysis, Duration::ZERO);
        assert!(state.is_busy());
        state.complete_pending(op.id);

        state.begin_write();
        assert!(state.is_busy());
        state.finish_write();
        state.finish_write();
        assert!(!state.is_busy());
    }

    #[test]
    fn test_record_write_sequence() {
        let mut state = AppState::new();
        state.record_write(PathBuf::from("/tmp/a.json"), None);
        state.record_write(PathBuf::from("/tmp/a.json"), None);
        assert_eq!(state.last_write.as_ref().unwrap().sequence, 2);
    }
}
