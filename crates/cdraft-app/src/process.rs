//! Message processing through the TEA update loop

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use cdraft_core::prelude::*;

use crate::actions::{handle_action, PendingTaskMap};
use crate::handler;
use crate::message::Message;
use crate::services::DocumentStore;
use crate::state::AppState;

/// Process a message and its follow-ups, dispatching resulting actions
///
/// Returns the rejections produced along the way, in order.
pub fn process_message<S>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    store: &Arc<S>,
    pending_tasks: &PendingTaskMap,
    shutdown_rx: &watch::Receiver<bool>,
) -> Vec<Error>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let mut rejections = Vec::new();

    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(
                action,
                msg_tx.clone(),
                store.clone(),
                pending_tasks.clone(),
                shutdown_rx.clone(),
            );
        }

        if let Some(rejection) = result.rejection {
            rejections.push(rejection);
        }

        // Continue with follow-up message
        msg = result.message;
    }

    rejections
}
