//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{Responder, WebhookResponder};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, webhook_url: String) {
    launch_with_responder(cmd_rx, ui_tx, move || WebhookResponder::new(webhook_url));
}

/// Spawns the backend thread. The responder is built on that thread, inside
/// the runtime, so its HTTP client binds to the right reactor.
pub fn launch_with_responder<R, F>(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    make_responder: F,
) -> thread::JoinHandle<()>
where
    R: Responder + 'static,
    F: FnOnce() -> R + Send + 'static,
{
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let responder = make_responder();
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SendMessage { request } => {
                        tracing::info!(
                            text_len = request.message.len(),
                            history_len = request.history.len(),
                            "backend: send_message"
                        );
                        let event = match responder.respond(&request).await {
                            Ok(reply) => UiEvent::ReplyReceived(reply),
                            Err(err) => {
                                tracing::error!("backend: send_message failed: {err}");
                                UiEvent::RequestFailed(err)
                            }
                        };
                        // Blocking send: dropping a reply would leave the UI awaiting forever.
                        if ui_tx.send(event).is_err() {
                            tracing::warn!("ui event queue closed; stopping backend worker");
                            break;
                        }
                    }
                }
            }
            tracing::info!("backend worker stopped");
        });
    })
}
