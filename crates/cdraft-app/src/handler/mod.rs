//! Handler module - TEA update function and message handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function, view transitions and dispatch
//! - `review`: Counts review handlers
//! - `draft`: Draft editor and document store handlers

pub(crate) mod draft;
pub(crate) mod review;
pub(crate) mod update;


use cdraft_core::prelude::*;
use cdraft_core::{DraftedComplaint, ExportFormat};

use crate::message::Message;
use crate::state::{AppState, NoticeLevel, OperationId, PendingOperation, View};

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Start a timer that reports `OperationElapsed` after its delay
    SchedulePending { operation: PendingOperation },

    /// Abort a timer before it fires
    CancelPending { id: OperationId },

    /// Write the draft through the document store
    SaveDraft { document: Box<DraftedComplaint> },

    /// Export the draft through the document store
    ExportDraft {
        document: Box<DraftedComplaint>,
        format: ExportFormat,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
    /// Set when the message was not valid for the current state
    pub rejection: Option<Error>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            ..Self::default()
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }

    pub fn rejected(error: Error) -> Self {
        Self {
            rejection: Some(error),
            ..Self::default()
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}

/// Turn a failed precondition into a rejection and an error notice
pub(crate) fn reject(state: &mut AppState, error: Error) -> UpdateResult {
    warn!("Rejected in {} view: {}", state.view, error);
    state.set_notice(NoticeLevel::Error, error.to_string());
    UpdateResult::rejected(error)
}

/// Check that `action` is available in the current view
pub(crate) fn require_view(state: &AppState, expected: View, action: &str) -> Result<()> {
    if state.view == expected {
        Ok(())
    } else {
        Err(Error::not_allowed(
            action,
            format!("only available in {} view, current view is {}", expected, state.view),
        ))
    }
}
