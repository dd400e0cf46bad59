//! Draft editor and document store handlers

use std::path::PathBuf;

use cdraft_core::prelude::*;
use cdraft_core::{DraftedComplaint, ExportFormat, SectionId};

use crate::editor::{EditOutcome, EditTarget, SectionEditor};
use crate::state::{AppState, NoticeLevel, View};

use super::{reject, require_view, UpdateAction, UpdateResult};

/// Borrow the editor if the draft-editor view is active
fn editor_mut<'a>(state: &'a mut AppState, action: &str) -> Result<&'a mut SectionEditor> {
    require_view(state, View::DraftEditor, action)?;
    state
        .editor
        .as_mut()
        .ok_or_else(|| Error::not_allowed(action, "no draft has been generated"))
}

/// Surface numbering drift left behind by a commit
fn report_outcome(state: &mut AppState, outcome: &EditOutcome) {
    if let Some(issue) = outcome.numbering_issues.first() {
        state.set_notice(
            NoticeLevel::Warning,
            format!(
                "Paragraph numbering no longer continuous: {} ({} issue(s))",
                issue,
                outcome.numbering_issues.len()
            ),
        );
    }
}

pub(crate) fn handle_select_section(state: &mut AppState, id: SectionId) -> UpdateResult {
    match editor_mut(state, "Select section").and_then(|editor| editor.select(id)) {
        Ok(()) => UpdateResult::none(),
        Err(e) => reject(state, e),
    }
}

pub(crate) fn handle_begin_edit(state: &mut AppState, target: EditTarget) -> UpdateResult {
    match editor_mut(state, "Edit section").and_then(|editor| editor.begin_edit(target)) {
        Ok(previous) => {
            if let Some(outcome) = previous {
                report_outcome(state, &outcome);
            }
            UpdateResult::none()
        }
        Err(e) => reject(state, e),
    }
}

pub(crate) fn handle_update_buffer(state: &mut AppState, text: String) -> UpdateResult {
    match editor_mut(state, "Edit section").and_then(|editor| editor.update_buffer(text)) {
        Ok(()) => UpdateResult::none(),
        Err(e) => reject(state, e),
    }
}

pub(crate) fn handle_commit(state: &mut AppState) -> UpdateResult {
    match editor_mut(state, "Commit edit").and_then(|editor| editor.commit_edit()) {
        Ok(outcome) => {
            report_outcome(state, &outcome);
            UpdateResult::none()
        }
        Err(e) => reject(state, e),
    }
}

pub(crate) fn handle_cancel(state: &mut AppState) -> UpdateResult {
    match editor_mut(state, "Cancel edit").and_then(|editor| editor.cancel_edit()) {
        Ok(session) => {
            debug!("Discarded edit of {}", session.target.section());
            UpdateResult::none()
        }
        Err(e) => reject(state, e),
    }
}

/// Commit any open session, then hand back a copy of the draft
fn flush_edits(state: &mut AppState, action: &str) -> Result<Box<DraftedComplaint>> {
    let editor = editor_mut(state, action)?;
    let outcome = if editor.is_editing() {
        Some(editor.commit_edit()?)
    } else {
        None
    };
    let document = Box::new(editor.draft().clone());

    if let Some(outcome) = outcome {
        report_outcome(state, &outcome);
    }
    Ok(document)
}

pub(crate) fn handle_save(state: &mut AppState) -> UpdateResult {
    match flush_edits(state, "Save draft") {
        Ok(document) => {
            state.begin_write();
            UpdateResult::action(UpdateAction::SaveDraft { document })
        }
        Err(e) => reject(state, e),
    }
}

pub(crate) fn handle_export(state: &mut AppState, format: Option<ExportFormat>) -> UpdateResult {
    let format = format.unwrap_or(state.settings.export.default_format);
    match flush_edits(state, "Export draft") {
        Ok(document) => {
            state.begin_write();
            UpdateResult::action(UpdateAction::ExportDraft { document, format })
        }
        Err(e) => reject(state, e),
    }
}

pub(crate) fn handle_saved(state: &mut AppState, path: PathBuf) -> UpdateResult {
    state.finish_write();
    info!("Draft saved to {}", path.display());
    state.set_notice(NoticeLevel::Info, format!("Draft saved to {}", path.display()));
    state.record_write(path, None);
    UpdateResult::none()
}

pub(crate) fn handle_save_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.finish_write();
    error!("Draft save failed: {}", error);
    state.set_notice(NoticeLevel::Error, format!("Save failed: {error}"));
    UpdateResult::none()
}

pub(crate) fn handle_exported(
    state: &mut AppState,
    path: PathBuf,
    format: ExportFormat,
) -> UpdateResult {
    state.finish_write();
    info!("Draft exported as {} to {}", format, path.display());
    state.set_notice(
        NoticeLevel::Info,
        format!("Exported {} to {}", format, path.display()),
    );
    state.record_write(path, Some(format));
    UpdateResult::none()
}

pub(crate) fn handle_export_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.finish_write();
    error!("Draft export failed: {}", error);
    state.set_notice(NoticeLevel::Error, format!("Export failed: {error}"));
    UpdateResult::none()
}
