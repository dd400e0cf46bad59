//! Counts review handlers

use cdraft_core::prelude::*;

use crate::state::{AppState, OperationKind, View};

use super::{reject, require_view, UpdateAction, UpdateResult};

/// Run `op` against the count list if the review view is active
fn with_review<F>(state: &mut AppState, action: &str, op: F) -> UpdateResult
where
    F: FnOnce(&mut AppState) -> Result<()>,
{
    match require_view(state, View::CountsReview, action).and_then(|_| op(state)) {
        Ok(()) => UpdateResult::none(),
        Err(e) => reject(state, e),
    }
}

pub(crate) fn handle_toggle(state: &mut AppState, id: u32) -> UpdateResult {
    with_review(state, "Toggle count", |state| {
        state.counts.toggle_selection(id).map(|_| ())
    })
}

pub(crate) fn handle_add_custom(state: &mut AppState) -> UpdateResult {
    with_review(state, "Add custom count", |state| {
        let id = state.counts.add_custom_count();
        info!("Custom count {} added", id);
        Ok(())
    })
}

pub(crate) fn handle_delete(state: &mut AppState, id: u32) -> UpdateResult {
    with_review(state, "Delete count", |state| {
        state.counts.delete_count(id).map(|_| ())
    })
}

pub(crate) fn handle_edit_title(state: &mut AppState, id: u32, title: String) -> UpdateResult {
    with_review(state, "Edit count title", |state| {
        state.counts.edit_title(id, title)
    })
}

pub(crate) fn handle_edit_description(
    state: &mut AppState,
    id: u32,
    description: String,
) -> UpdateResult {
    with_review(state, "Edit count description", |state| {
        state.counts.edit_description(id, description)
    })
}

pub(crate) fn handle_generate(state: &mut AppState) -> UpdateResult {
    if let Err(e) = require_view(state, View::CountsReview, "Generate") {
        return reject(state, e);
    }
    if !state.generate_enabled() {
        return reject(state, Error::NoCountsSelected);
    }

    let (selected, total) = state.selection_summary();
    info!("Generating draft from {} of {} counts", selected, total);
    state.view = View::Generating;

    let operation = state.begin_operation(
        OperationKind::Generation,
        state.settings.timing.generation_delay(),
    );
    UpdateResult::action(UpdateAction::SchedulePending { operation })
}
