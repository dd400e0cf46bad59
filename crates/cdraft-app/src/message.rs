//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use cdraft_core::{ExportFormat, SectionId};

use crate::editor::EditTarget;
use crate::state::OperationId;

/// All possible messages in the application
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Wizard Flow
    // ─────────────────────────────────────────────────────────
    /// Pick a blueprint on the homepage and start analysis
    SelectBlueprint { id: u32 },

    /// A scheduled timer fired
    OperationElapsed { id: OperationId },

    /// Leave the counts review for the homepage
    Back,

    /// Start drafting from the selected counts
    Generate,

    // ─────────────────────────────────────────────────────────
    // Counts Review
    // ─────────────────────────────────────────────────────────
    ToggleCount { id: u32 },
    AddCustomCount,
    DeleteCount { id: u32 },
    EditCountTitle { id: u32, title: String },
    EditCountDescription { id: u32, description: String },

    // ─────────────────────────────────────────────────────────
    // Draft Editor
    // ─────────────────────────────────────────────────────────
    SelectSection { id: SectionId },
    BeginEdit { target: EditTarget },
    UpdateEditBuffer { text: String },
    CommitEdit,
    CancelEdit,

    /// Persist the current draft
    SaveDraft,
    /// Export the current draft; `None` uses the configured default
    ExportDraft { format: Option<ExportFormat> },

    // ─────────────────────────────────────────────────────────
    // Document Store Results
    // ─────────────────────────────────────────────────────────
    DraftSaved { path: PathBuf },
    DraftSaveFailed { error: String },
    DraftExported { path: PathBuf, format: ExportFormat },
    DraftExportFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Control
    // ─────────────────────────────────────────────────────────
    DismissNotice,

    /// Cancel pending work and dispose the state
    Shutdown,
}
