//! Action handlers: UpdateAction dispatch and background task spawning

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use cdraft_core::prelude::*;

use crate::message::Message;
use crate::services::DocumentStore;
use crate::state::{OperationId, PendingOperation};
use crate::UpdateAction;

/// Convenience type alias for timer task tracking
pub type PendingTaskMap = Arc<std::sync::Mutex<HashMap<OperationId, JoinHandle<()>>>>;

/// Execute an action by spawning a background task
pub fn handle_action<S>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    store: Arc<S>,
    pending_tasks: PendingTaskMap,
    shutdown_rx: watch::Receiver<bool>,
) where
    S: DocumentStore + Send + Sync + 'static,
{
    match action {
        UpdateAction::SchedulePending { operation } => {
            spawn_timer(operation, msg_tx, pending_tasks, shutdown_rx);
        }

        UpdateAction::CancelPending { id } => {
            cancel_timer(id, &pending_tasks);
        }

        UpdateAction::SaveDraft { document } => {
            tokio::spawn(async move {
                let msg = match store.persist(&document).await {
                    Ok(path) => Message::DraftSaved { path },
                    Err(e) => Message::DraftSaveFailed {
                        error: e.to_string(),
                    },
                };
                if msg_tx.send(msg).await.is_err() {
                    warn!("Message channel closed before save result was delivered");
                }
            });
        }

        UpdateAction::ExportDraft { document, format } => {
            tokio::spawn(async move {
                let msg = match store.export(&document, format).await {
                    Ok(path) => Message::DraftExported { path, format },
                    Err(e) => Message::DraftExportFailed {
                        error: e.to_string(),
                    },
                };
                if msg_tx.send(msg).await.is_err() {
                    warn!("Message channel closed before export result was delivered");
                }
            });
        }
    }
}

/// Sleep for the operation's delay, then report `OperationElapsed`
///
/// The task exits without reporting if shutdown is signalled first.
fn spawn_timer(
    operation: PendingOperation,
    msg_tx: mpsc::Sender<Message>,
    pending_tasks: PendingTaskMap,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    if *shutdown_rx.borrow() {
        debug!("Shutdown in progress, not scheduling {}", operation.id);
        return;
    }

    let id = operation.id;
    let handle = tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(operation.delay) => {
                trace!("Operation {} elapsed after {:?}", id, operation.delay);
                if msg_tx.send(Message::OperationElapsed { id }).await.is_err() {
                    debug!("Message channel closed, dropping elapsed {}", id);
                }
            }
            _ = shutdown_rx.changed() => {
                debug!("Operation {} cancelled by shutdown", id);
            }
        }
    });

    match pending_tasks.lock() {
        Ok(mut tasks) => {
            tasks.retain(|_, h| !h.is_finished());
            tasks.insert(id, handle);
        }
        Err(e) => warn!("Pending task map poisoned: {}", e),
    }
}

fn cancel_timer(id: OperationId, pending_tasks: &PendingTaskMap) {
    let handle = match pending_tasks.lock() {
        Ok(mut tasks) => tasks.remove(&id),
        Err(e) => {
            warn!("Pending task map poisoned: {}", e);
            None
        }
    };

    match handle {
        Some(handle) => {
            handle.abort();
            debug!("Aborted timer for {}", id);
        }
        None => debug!("No timer task for {}", id),
    }
}
