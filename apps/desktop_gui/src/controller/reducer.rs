//! Applies backend events to the UI-thread conversation state.

use client_core::ConversationSession;
use shared::error::ChatError;

use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn apply_ui_event(session: &mut ConversationSession, status: &mut String, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            *status = message;
        }
        UiEvent::ReplyReceived(reply) => {
            if !session.is_awaiting_reply() {
                tracing::warn!("dropping reply that arrived with no send pending");
                return;
            }
            let _ = session.complete_send(Ok(reply));
        }
        UiEvent::RequestFailed(err) => {
            if !session.is_awaiting_reply() {
                tracing::warn!("dropping failure that arrived with no send pending: {err}");
                return;
            }
            *status = UiError::from_message(UiErrorContext::SendMessage, err.to_string())
                .status_line();
            let _ = session.complete_send(Err(err));
        }
        UiEvent::Error(err) => {
            tracing::error!(
                category = ?err.category(),
                context = ?err.context(),
                "{}",
                err.message()
            );
            *status = err.status_line();
            if session.is_awaiting_reply() {
                let _ = session.complete_send(Err(ChatError::request_failed(err.message())));
            }
        }
    }
}
