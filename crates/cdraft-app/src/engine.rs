//! Engine - orchestration state shared by runners and tests
//!
//! The Engine owns the TEA state, the message channel, timer task tracking,
//! the shutdown signal and the document store. After every processed message
//! it compares state snapshots and broadcasts [`EngineEvent`]s.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};

use cdraft_core::prelude::*;

use crate::actions::PendingTaskMap;
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::services::{DocumentStore, FileDocumentStore};
use crate::state::{AppState, Notice, View};

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    view: View,
    counts_revision: u64,
    has_draft: bool,
    editor_revision: u64,
    drift_len: usize,
    notice: Option<Notice>,
    write_sequence: u64,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        let editor = state.editor.as_ref();
        Self {
            view: state.view,
            counts_revision: state.counts.revision(),
            has_draft: editor.is_some(),
            editor_revision: editor.map(|e| e.revision()).unwrap_or(0),
            drift_len: editor.map(|e| e.numbering_drift().len()).unwrap_or(0),
            notice: state.notice.clone(),
            write_sequence: state.last_write.as_ref().map(|w| w.sequence).unwrap_or(0),
        }
    }
}

/// Orchestration engine for Complaint Drafter.
pub struct Engine<S = FileDocumentStore> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The runner drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Timer task handles by operation id.
    pub pending_tasks: PendingTaskMap,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    store: Arc<S>,

    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine<FileDocumentStore> {
    /// Create an engine writing drafts into the configured export directory
    pub fn new(settings: Settings) -> Self {
        let store = FileDocumentStore::new(settings.export.directory.clone());
        Self::with_store(settings, store)
    }
}

impl<S> Engine<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn with_store(settings: Settings, store: S) -> Self {
        Self::with_state(AppState::with_settings(settings), store)
    }

    /// Create an engine around prepared state (custom clock, fixtures)
    pub fn with_state(state: AppState, store: S) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let pending_tasks: PendingTaskMap = Arc::new(std::sync::Mutex::new(HashMap::new()));
        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            pending_tasks,
            shutdown_tx,
            shutdown_rx,
            store: Arc::new(store),
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle.
    ///
    /// Emits EngineEvents for rejections and for state changes detected by
    /// comparing before/after snapshots.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        let rejections = process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.store,
            &self.pending_tasks,
            &self.shutdown_rx,
        );

        let post = StateSnapshot::capture(&self.state);

        for rejection in rejections {
            self.emit(EngineEvent::Rejected {
                reason: rejection.to_string(),
            });
        }
        self.emit_events(&pre, &post);
        self.emit_scroll_request();
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Number of timer tasks still running
    pub fn pending_task_count(&self) -> usize {
        match self.pending_tasks.lock() {
            Ok(tasks) => tasks.values().filter(|h| !h.is_finished()).count(),
            Err(_) => 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Dispose state, cancel pending timers and signal background tasks.
    pub async fn shutdown(&mut self) {
        if !self.state.is_disposed() {
            self.process_message(Message::Shutdown);
        }

        self.emit(EngineEvent::Shutdown);

        // Signal all background tasks to stop
        let _ = self.shutdown_tx.send(true);

        let tasks: Vec<_> = match self.pending_tasks.lock() {
            Ok(mut map) => map.drain().collect(),
            Err(e) => {
                warn!("Pending task map poisoned: {}", e);
                Vec::new()
            }
        };

        for (id, handle) in tasks {
            match tokio::time::timeout(Duration::from_secs(2), handle).await {
                Ok(Ok(())) => debug!("Timer {} stopped", id),
                Ok(Err(e)) if e.is_cancelled() => debug!("Timer {} aborted", id),
                Ok(Err(e)) => warn!("Timer {} panicked: {}", id, e),
                Err(_) => warn!("Timer {} cleanup timed out", id),
            }
        }

        info!("Engine shut down");
    }

    /// Emit EngineEvents based on state changes after processing.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre == post {
            return;
        }

        if pre.view != post.view {
            self.emit(EngineEvent::ViewChanged {
                from: pre.view,
                to: post.view,
            });
        }

        // Counts are only meaningful while under review
        let entered_review = pre.view != View::CountsReview && post.view == View::CountsReview;
        if post.view == View::CountsReview
            && (entered_review || pre.counts_revision != post.counts_revision)
        {
            self.emit(EngineEvent::CountsUpdated {
                counts: self.state.counts.review_counts(),
                edited: self.state.counts.edited_ids(),
                generate_enabled: self.state.generate_enabled(),
            });
        }

        if let Some(editor) = self.state.editor.as_ref() {
            if !pre.has_draft {
                self.emit(EngineEvent::DraftReady {
                    document: Box::new(editor.draft().clone()),
                });
            } else if pre.editor_revision != post.editor_revision {
                if let Some(section) = editor.last_changed().and_then(|id| editor.draft().section(id))
                {
                    self.emit(EngineEvent::SectionUpdated {
                        section: Box::new(section.clone()),
                    });
                }
            }

            if post.drift_len > 0 && pre.drift_len != post.drift_len {
                self.emit(EngineEvent::NumberingDrift {
                    issues: editor.numbering_drift(),
                });
            }
        }

        if pre.notice != post.notice {
            if let Some(notice) = post.notice.clone() {
                self.emit(EngineEvent::Notice { notice });
            }
        }

        if pre.write_sequence != post.write_sequence {
            if let Some(write) = self.state.last_write.as_ref() {
                match write.format {
                    Some(format) => self.emit(EngineEvent::DraftExported {
                        path: write.path.clone(),
                        format,
                    }),
                    None => self.emit(EngineEvent::DraftSaved {
                        path: write.path.clone(),
                    }),
                }
            }
        }
    }

    /// Take the editor's scroll-into-view request, if any
    ///
    /// Every accepted selection produces one, including re-selecting the
    /// current section.
    fn emit_scroll_request(&mut self) {
        let requested = self
            .state
            .editor
            .as_mut()
            .and_then(|editor| editor.take_scroll_request());
        if let Some(id) = requested {
            self.emit(EngineEvent::SectionSelected { id });
        }
    }

    /// Broadcast an event; no subscribers is not an error
    fn emit(&self, event: EngineEvent) {
        trace!("Engine event: {}", event.event_type());
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;
    use crate::state::NoticeLevel;
    use cdraft_core::{Clock, DraftedComplaint, ExportFormat, SectionId};

    struct FixedClock;

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
        }
    }

    struct FailingStore;

    impl DocumentStore for FailingStore {
        async fn persist(&self, _document: &DraftedComplaint) -> Result<PathBuf> {
            Err(Error::persist("disk full"))
        }

        async fn export(&self, _document: &DraftedComplaint, _format: ExportFormat) -> Result<PathBuf> {
            Err(Error::export("read-only volume"))
        }
    }

    fn engine_with<S: DocumentStore + Send + Sync + 'static>(store: S) -> Engine<S> {
        let state = AppState::new().with_clock(Arc::new(FixedClock));
        Engine::with_state(state, store)
    }

    fn drain_events(rx: &mut broadcast::Receiver<EngineEvent>) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                Err(TryRecvError::Lagged(_)) => continue,
            }
        }
        events
    }

    /// Await the next channel message and process it
    async fn step<S: DocumentStore + Send + Sync + 'static>(engine: &mut Engine<S>) {
        let msg = engine.msg_rx.recv().await.expect("channel open");
        engine.process_message(msg);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_drive_wizard_to_editor() {
        let temp = tempfile::tempdir().unwrap();
        let mut engine = engine_with(FileDocumentStore::new(temp.path()));
        let mut events = engine.subscribe();

        engine.process_message(Message::SelectBlueprint { id: 1 });
        assert_eq!(engine.state.view, View::Analyzing);
        assert_eq!(engine.pending_task_count(), 1);

        step(&mut engine).await;
        assert_eq!(engine.state.view, View::CountsReview);

        engine.process_message(Message::Generate);
        step(&mut engine).await;
        assert_eq!(engine.state.view, View::DraftEditor);

        let kinds: Vec<_> = drain_events(&mut events)
            .iter()
            .map(|e| e.event_type())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "view_changed",
                "view_changed",
                "counts_updated",
                "view_changed",
                "view_changed",
                "draft_ready"
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_timer_before_it_fires() {
        let mut engine = engine_with(FailingStore);
        engine.process_message(Message::SelectBlueprint { id: 1 });
        assert_eq!(engine.pending_task_count(), 1);

        engine.shutdown().await;

        assert_eq!(engine.pending_task_count(), 0);
        assert!(engine.should_quit());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(engine.msg_rx.try_recv().is_err());
        assert_eq!(engine.state.view, View::Analyzing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_failure_sets_error_notice() {
        let mut engine = engine_with(FailingStore);
        engine.process_message(Message::SelectBlueprint { id: 1 });
        step(&mut engine).await;
        engine.process_message(Message::Generate);
        step(&mut engine).await;
        let before = engine.state.draft().unwrap().clone();
        let mut events = engine.subscribe();

        engine.process_message(Message::SaveDraft);
        step(&mut engine).await;

        assert_eq!(engine.state.draft().unwrap(), &before);
        let notice = engine.state.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("disk full"));

        let events = drain_events(&mut events);
        assert!(events
            .iter()
            .any(|e| matches!(e, EngineEvent::Notice { .. })));
        assert!(!events
            .iter()
            .any(|e| matches!(e, EngineEvent::DraftSaved { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_writes_file_and_emits_event() {
        let temp = tempfile::tempdir().unwrap();
        let mut engine = engine_with(FileDocumentStore::new(temp.path()));
        engine.process_message(Message::SelectBlueprint { id: 1 });
        step(&mut engine).await;
        engine.process_message(Message::Generate);
        step(&mut engine).await;
        let mut events = engine.subscribe();

        engine.process_message(Message::ExportDraft {
            format: Some(ExportFormat::Markdown),
        });
        step(&mut engine).await;

        let exported = drain_events(&mut events).into_iter().find_map(|e| match e {
            EngineEvent::DraftExported { path, format } => Some((path, format)),
            _ => None,
        });
        let (path, format) = exported.expect("export event");
        assert_eq!(format, ExportFormat::Markdown);
        assert_eq!(path, temp.path().join("complaint.md"));
        assert!(path.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_description_edit_hides_support_in_counts_event() {
        let mut engine = engine_with(FailingStore);
        engine.process_message(Message::SelectBlueprint { id: 1 });
        step(&mut engine).await;
        let mut events = engine.subscribe();

        engine.process_message(Message::EditCountDescription {
            id: 1,
            description: "Defendant ran a red light.".into(),
        });

        let counts = drain_events(&mut events).into_iter().find_map(|e| match e {
            EngineEvent::CountsUpdated { counts, edited, .. } => Some((counts, edited)),
            _ => None,
        });
        let (counts, edited) = counts.expect("counts event");
        assert_eq!(edited, vec![1]);
        assert_eq!(counts[0].description, "Defendant ran a red light.");
        assert!(counts[0].key_facts.is_empty());
        assert!(counts[0].supporting_docs.is_empty());

        let stored = engine.state.counts.counts();
        assert!(!stored[0].supporting_docs.is_empty());
        assert_eq!(counts[1].key_facts, stored[1].key_facts);
        assert_eq!(counts[1].supporting_docs, stored[1].supporting_docs);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reselecting_section_emits_selection_each_time() {
        let mut engine = engine_with(FailingStore);
        engine.process_message(Message::SelectBlueprint { id: 1 });
        step(&mut engine).await;
        engine.process_message(Message::Generate);
        step(&mut engine).await;
        let mut events = engine.subscribe();

        engine.process_message(Message::SelectSection {
            id: SectionId::Count(2),
        });
        engine.process_message(Message::SelectSection {
            id: SectionId::Count(2),
        });

        let selected: Vec<_> = drain_events(&mut events)
            .into_iter()
            .filter_map(|e| match e {
                EngineEvent::SectionSelected { id } => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(selected, vec![SectionId::Count(2), SectionId::Count(2)]);
    }

    #[tokio::test]
    async fn test_rejection_emits_event() {
        let mut engine = engine_with(FailingStore);
        let mut events = engine.subscribe();

        engine.process_message(Message::Generate);

        let events = drain_events(&mut events);
        assert!(matches!(events.first(), Some(EngineEvent::Rejected { .. })));
        assert_eq!(engine.state.view, View::Homepage);
    }

    #[tokio::test]
    async fn test_drain_pending_messages() {
        let mut engine = engine_with(FailingStore);
        engine.msg_tx.send(Message::SelectBlueprint { id: 1 }).await.unwrap();
        engine.msg_tx.send(Message::DismissNotice).await.unwrap();

        assert_eq!(engine.drain_pending_messages(), 2);
        assert_eq!(engine.state.view, View::Analyzing);
        engine.shutdown().await;
    }
}
