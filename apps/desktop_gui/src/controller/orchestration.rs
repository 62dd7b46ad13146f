//! Command orchestration helpers from UI actions to backend command queue.

use client_core::ConversationSession;
use crossbeam_channel::{Sender, TrySendError};
use shared::error::ChatError;

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), ChatError> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(ChatError::request_failed(
            "UI command queue is full; please retry",
        )),
        Err(TrySendError::Disconnected(_)) => Err(ChatError::request_failed(
            "Backend command processor disconnected (possible startup/runtime failure)",
        )),
    }
}

/// Starts a send for the composer draft and hands the request to the backend.
///
/// Returns whether a send was started. The draft is cleared only then. A
/// failed hand-off completes the send immediately so the session never stays
/// stuck awaiting a reply that cannot arrive.
pub fn submit_draft(
    session: &mut ConversationSession,
    draft: &mut String,
    cmd_tx: &Sender<BackendCommand>,
) -> bool {
    let pending = match session.begin_send(draft) {
        Ok(pending) => pending,
        Err(err) => {
            tracing::debug!(code = ?err.code(), "composer submit ignored");
            return false;
        }
    };
    draft.clear();

    if let Err(err) = dispatch_backend_command(
        cmd_tx,
        BackendCommand::SendMessage {
            request: pending.request,
        },
    ) {
        tracing::error!("failed to queue send_message: {err}");
        let _ = session.complete_send(Err(err));
    }
    true
}
