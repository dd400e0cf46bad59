//! Main update function - handles state transitions (TEA pattern)
//!
//! Handler implementations live in:
//! - `review`: counts review edits and Generate
//! - `draft`: section editing, save and export

use cdraft_core::fixtures::{find_blueprint, sample_counts};
use cdraft_core::prelude::*;

use crate::counts::CountList;
use crate::editor::SectionEditor;
use crate::message::Message;
use crate::state::{AppState, OperationId, OperationKind, View};

use super::{draft, reject, require_view, review, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message, action and/or rejection
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    if state.is_disposed() {
        debug!("State disposed, ignoring {:?}", message);
        return UpdateResult::none();
    }

    match message {
        Message::Shutdown => handle_shutdown(state),

        Message::DismissNotice => {
            state.notice = None;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Wizard Flow
        // ─────────────────────────────────────────────────────────
        Message::SelectBlueprint { id } => handle_select_blueprint(state, id),
        Message::OperationElapsed { id } => handle_operation_elapsed(state, id),
        Message::Back => handle_back(state),

        // ─────────────────────────────────────────────────────────
        // Counts Review
        // ─────────────────────────────────────────────────────────
        Message::Generate => review::handle_generate(state),
        Message::ToggleCount { id } => review::handle_toggle(state, id),
        Message::AddCustomCount => review::handle_add_custom(state),
        Message::DeleteCount { id } => review::handle_delete(state, id),
        Message::EditCountTitle { id, title } => review::handle_edit_title(state, id, title),
        Message::EditCountDescription { id, description } => {
            review::handle_edit_description(state, id, description)
        }

        // ─────────────────────────────────────────────────────────
        // Draft Editor
        // ─────────────────────────────────────────────────────────
        Message::SelectSection { id } => draft::handle_select_section(state, id),
        Message::BeginEdit { target } => draft::handle_begin_edit(state, target),
        Message::UpdateEditBuffer { text } => draft::handle_update_buffer(state, text),
        Message::CommitEdit => draft::handle_commit(state),
        Message::CancelEdit => draft::handle_cancel(state),
        Message::SaveDraft => draft::handle_save(state),
        Message::ExportDraft { format } => draft::handle_export(state, format),

        // ─────────────────────────────────────────────────────────
        // Document Store Results
        // ─────────────────────────────────────────────────────────
        Message::DraftSaved { path } => draft::handle_saved(state, path),
        Message::DraftSaveFailed { error } => draft::handle_save_failed(state, error),
        Message::DraftExported { path, format } => draft::handle_exported(state, path, format),
        Message::DraftExportFailed { error } => draft::handle_export_failed(state, error),
    }
}

fn handle_shutdown(state: &mut AppState) -> UpdateResult {
    info!("Shutting down from {} view", state.view);
    match state.dispose() {
        Some(operation) => UpdateResult::action(UpdateAction::CancelPending { id: operation.id }),
        None => UpdateResult::none(),
    }
}

fn handle_select_blueprint(state: &mut AppState, id: u32) -> UpdateResult {
    if let Err(e) = require_view(state, View::Homepage, "Select blueprint") {
        return reject(state, e);
    }

    let Some(blueprint) = find_blueprint(id) else {
        return reject(state, Error::BlueprintNotFound { id });
    };

    info!("Blueprint '{}' selected, analyzing case", blueprint.name);
    state.blueprint = Some(blueprint);
    state.view = View::Analyzing;

    let operation = state.begin_operation(
        OperationKind::Analysis,
        state.settings.timing.analysis_delay(),
    );
    UpdateResult::action(UpdateAction::SchedulePending { operation })
}

fn handle_operation_elapsed(state: &mut AppState, id: OperationId) -> UpdateResult {
    let Some(operation) = state.complete_pending(id) else {
        debug!("Ignoring elapsed notification for stale operation {}", id);
        return UpdateResult::none();
    };

    match (operation.kind, state.view) {
        (OperationKind::Analysis, View::Analyzing) => {
            state.counts = CountList::from_counts(sample_counts());
            state.view = View::CountsReview;
            info!("Analysis complete, {} counts proposed", state.counts.len());
        }
        (OperationKind::Generation, View::Generating) => {
            let selected = state.counts.selected_counts();
            let draft = state.generator.generate(&selected, state.today());
            info!(
                "Draft generated with {} counts, {} placeholders to fill",
                draft.counts.len(),
                draft.placeholders().len()
            );
            state.editor = Some(SectionEditor::new(draft));
            state.view = View::DraftEditor;
        }
        (kind, view) => {
            debug!("Ignoring {:?} completion in {} view", kind, view);
        }
    }

    UpdateResult::none()
}

fn handle_back(state: &mut AppState) -> UpdateResult {
    if let Err(e) = require_view(state, View::CountsReview, "Back") {
        return reject(state, e);
    }

    state.reset_to_homepage();
    debug!("Returned to homepage, review discarded");
    UpdateResult::none()
}
