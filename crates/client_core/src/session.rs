//! Conversation state: the transcript, the in-flight flag and the last error.
//!
//! A send runs in two phases. [`ConversationSession::begin_send`] appends the
//! user message, marks the session as awaiting and returns the request to
//! issue; [`ConversationSession::complete_send`] records the outcome and
//! clears the awaiting flag. Front ends that run the request elsewhere (the
//! GUI backend thread) drive the phases themselves, everything else can use
//! [`ConversationSession::send_user_message`].

use chrono::Utc;
use shared::{
    domain::{ChatMessage, MessageId, Sender},
    error::ChatError,
    protocol::WebhookRequest,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{quick_actions::QuickAction, responder::Responder, transcript::format_transcript};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub message_count: usize,
    pub is_awaiting_reply: bool,
    pub last_error: Option<String>,
}

/// A user message that has been appended and whose request is now owed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub user_message_id: MessageId,
    pub request: WebhookRequest,
}

pub struct ConversationSession {
    messages: Vec<ChatMessage>,
    is_awaiting_reply: bool,
    last_error: Option<String>,
    next_id: u64,
    status_tx: watch::Sender<SessionSnapshot>,
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationSession {
    pub fn new() -> Self {
        let (status_tx, _) = watch::channel(SessionSnapshot::default());
        Self {
            messages: Vec::new(),
            is_awaiting_reply: false,
            last_error: None,
            next_id: 1,
            status_tx,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.is_awaiting_reply
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            message_count: self.messages.len(),
            is_awaiting_reply: self.is_awaiting_reply,
            last_error: self.last_error.clone(),
        }
    }

    /// Receives a fresh [`SessionSnapshot`] after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.status_tx.subscribe()
    }

    pub fn reset(&mut self, opening_line: impl Into<String>) -> MessageId {
        debug!(dropped = self.messages.len(), "session: reset transcript");
        self.messages.clear();
        self.append_responder_message(opening_line)
    }

    /// Appends a responder-side message. Never issues a request.
    pub fn append_responder_message(&mut self, text: impl Into<String>) -> MessageId {
        self.push_message(Sender::Responder, text.into())
    }

    pub fn apply_quick_action(&mut self, action: QuickAction) -> MessageId {
        info!(action = action.label(), "session: quick action");
        if action.resets_transcript() {
            self.reset(action.script())
        } else {
            self.append_responder_message(action.script())
        }
    }

    pub fn set_awaiting(&mut self, awaiting: bool) {
        self.is_awaiting_reply = awaiting;
        self.publish();
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.last_error = error;
        self.publish();
    }

    /// Appends the trimmed user text and marks the session as awaiting.
    ///
    /// The returned request carries the transcript including the new message.
    /// Blank input and a send while another is in flight leave the session
    /// untouched.
    pub fn begin_send(&mut self, text: &str) -> Result<PendingSend, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        if self.is_awaiting_reply {
            warn!("session: send rejected while a reply is pending");
            return Err(ChatError::AlreadyAwaiting);
        }

        self.last_error = None;
        self.is_awaiting_reply = true;
        let user_message_id = self.push_message(Sender::User, text.to_string());

        let request = WebhookRequest::new(text, format_transcript(&self.messages));
        info!(
            message_id = user_message_id.0,
            text_len = request.message.len(),
            history_len = request.history.len(),
            "session: send started"
        );
        Ok(PendingSend {
            user_message_id,
            request,
        })
    }

    /// Records the outcome of the request started by [`Self::begin_send`].
    /// The awaiting flag is cleared last on both paths.
    pub fn complete_send(
        &mut self,
        outcome: Result<String, ChatError>,
    ) -> Result<MessageId, ChatError> {
        let result = match outcome {
            Ok(reply) => Ok(self.append_responder_message(reply)),
            Err(err) => {
                warn!("session: send failed: {err}");
                self.set_error(err.banner_text());
                Err(err)
            }
        };
        self.set_awaiting(false);
        result
    }

    /// Runs a full send against `responder`, returning the reply's id.
    ///
    /// Dropping the returned future mid-request still clears the awaiting flag.
    pub async fn send_user_message<R>(
        &mut self,
        text: &str,
        responder: &R,
    ) -> Result<MessageId, ChatError>
    where
        R: Responder + ?Sized,
    {
        let pending = self.begin_send(text)?;
        let mut guard = AwaitingGuard { session: self };
        let outcome = responder.respond(&pending.request).await;
        let result = guard.session.complete_send(outcome);
        drop(guard);
        result
    }

    fn push_message(&mut self, sender: Sender, text: String) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            text,
            sender,
            created_at: Utc::now(),
        });
        debug!(message_id = id.0, ?sender, "session: message appended");
        self.publish();
        id
    }

    fn publish(&self) {
        self.status_tx.send_replace(self.snapshot());
    }
}

struct AwaitingGuard<'a> {
    session: &'a mut ConversationSession,
}

impl Drop for AwaitingGuard<'_> {
    fn drop(&mut self) {
        if self.session.is_awaiting_reply {
            warn!("session: send abandoned before completion");
            self.session.set_awaiting(false);
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
