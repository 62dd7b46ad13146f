use std::{collections::VecDeque, sync::Mutex, time::Duration};

use super::*;
use async_trait::async_trait;
use tokio::sync::oneshot;

/// Replays queued outcomes and records the session state seen at call time.
struct ProbeResponder {
    status: watch::Receiver<SessionSnapshot>,
    outcomes: Mutex<VecDeque<Result<String, ChatError>>>,
    calls: Mutex<Vec<(WebhookRequest, SessionSnapshot)>>,
}

impl ProbeResponder {
    fn new(
        session: &ConversationSession,
        outcomes: impl IntoIterator<Item = Result<String, ChatError>>,
    ) -> Self {
        Self {
            status: session.subscribe(),
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(WebhookRequest, SessionSnapshot)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl Responder for ProbeResponder {
    async fn respond(&self, request: &WebhookRequest) -> Result<String, ChatError> {
        let seen = self.status.borrow().clone();
        self.calls
            .lock()
            .expect("calls lock")
            .push((request.clone(), seen));
        self.outcomes
            .lock()
            .expect("outcomes lock")
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::request_failed("no scripted outcome")))
    }
}

/// Signals when the request starts and resolves only when released.
struct GatedResponder {
    started: Mutex<Option<oneshot::Sender<()>>>,
    release: tokio::sync::Mutex<Option<oneshot::Receiver<Result<String, ChatError>>>>,
}

#[async_trait]
impl Responder for GatedResponder {
    async fn respond(&self, _request: &WebhookRequest) -> Result<String, ChatError> {
        if let Some(tx) = self.started.lock().expect("started lock").take() {
            let _ = tx.send(());
        }
        let release = self.release.lock().await.take().expect("single use");
        release
            .await
            .unwrap_or_else(|_| Err(ChatError::request_failed("gate dropped")))
    }
}

struct PendingForeverResponder;

#[async_trait]
impl Responder for PendingForeverResponder {
    async fn respond(&self, _request: &WebhookRequest) -> Result<String, ChatError> {
        std::future::pending().await
    }
}

fn transcript(session: &ConversationSession) -> Vec<(Sender, &str)> {
    session
        .messages()
        .iter()
        .map(|m| (m.sender, m.text.as_str()))
        .collect()
}

#[tokio::test]
async fn successful_send_appends_user_message_then_reply() {
    let mut session = ConversationSession::new();
    let responder = ProbeResponder::new(&session, [Ok("Hi there".to_string())]);

    session
        .send_user_message("Hello", &responder)
        .await
        .expect("send");

    assert_eq!(
        transcript(&session),
        vec![(Sender::User, "Hello"), (Sender::Responder, "Hi there")]
    );
    assert!(!session.is_awaiting_reply());
    assert_eq!(session.last_error(), None);
}

#[tokio::test]
async fn failed_send_keeps_only_user_message_and_records_error() {
    let mut session = ConversationSession::new();
    let responder = ProbeResponder::new(
        &session,
        [Err(ChatError::request_failed("error sending request: connection refused"))],
    );

    let err = session
        .send_user_message("Hello", &responder)
        .await
        .expect_err("must fail");

    assert!(matches!(err, ChatError::RequestFailed { .. }));
    assert_eq!(transcript(&session), vec![(Sender::User, "Hello")]);
    assert!(!session.is_awaiting_reply());
    let banner = session.last_error().expect("error recorded");
    assert!(banner.contains("connection refused"));
}

#[tokio::test]
async fn blank_input_changes_nothing_and_issues_no_request() {
    let mut session = ConversationSession::new();
    session.append_responder_message("welcome");
    let responder = ProbeResponder::new(&session, [Ok("unused".to_string())]);

    for blank in ["", "   ", "\n\t "] {
        let err = session
            .send_user_message(blank, &responder)
            .await
            .expect_err("blank input");
        assert_eq!(err, ChatError::EmptyInput);
    }

    assert_eq!(transcript(&session), vec![(Sender::Responder, "welcome")]);
    assert!(!session.is_awaiting_reply());
    assert!(responder.calls().is_empty());
}

#[tokio::test]
async fn request_carries_trimmed_text_and_history_including_new_message() {
    let mut session = ConversationSession::new();
    session.reset("Welcome");
    let responder = ProbeResponder::new(&session, [Ok("Sure".to_string())]);

    session
        .send_user_message("  I want a flat  ", &responder)
        .await
        .expect("send");

    let calls = responder.calls();
    assert_eq!(calls.len(), 1);
    let (request, _) = &calls[0];
    assert_eq!(request.message, "I want a flat");
    assert_eq!(request.history, "AI:Welcome -- USER:I want a flat");
}

#[tokio::test]
async fn request_runs_while_awaiting_and_next_send_starts_without_stale_error() {
    let mut session = ConversationSession::new();
    let responder = ProbeResponder::new(
        &session,
        [
            Err(ChatError::request_failed("HTTP error! status: 502")),
            Ok("Back online".to_string()),
        ],
    );

    let _ = session.send_user_message("first", &responder).await;
    assert!(session.last_error().is_some());

    session
        .send_user_message("second", &responder)
        .await
        .expect("second send");

    let calls = responder.calls();
    assert_eq!(calls.len(), 2);
    for (_, seen) in &calls {
        assert!(seen.is_awaiting_reply);
    }
    assert_eq!(calls[1].1.last_error, None);
    assert_eq!(session.last_error(), None);
    assert_eq!(
        transcript(&session),
        vec![
            (Sender::User, "first"),
            (Sender::User, "second"),
            (Sender::Responder, "Back online"),
        ]
    );
}

#[tokio::test]
async fn awaiting_flag_spans_exactly_the_pending_request() {
    let mut session = ConversationSession::new();
    let mut status = session.subscribe();
    let (started_tx, started_rx) = oneshot::channel();
    let (release_tx, release_rx) = oneshot::channel();
    let responder = GatedResponder {
        started: Mutex::new(Some(started_tx)),
        release: tokio::sync::Mutex::new(Some(release_rx)),
    };

    assert!(!status.borrow().is_awaiting_reply);

    let task = tokio::spawn(async move {
        let result = session.send_user_message("Hello", &responder).await;
        (session, result)
    });

    started_rx.await.expect("request started");
    {
        let snapshot = status.borrow_and_update();
        assert!(snapshot.is_awaiting_reply);
        assert_eq!(snapshot.message_count, 1);
    }

    release_tx.send(Ok("Hi there".to_string())).expect("release");
    let (session, result) = task.await.expect("join");
    result.expect("send");

    assert!(!session.is_awaiting_reply());
    assert!(!status.borrow().is_awaiting_reply);
    assert_eq!(status.borrow().message_count, 2);
}

#[tokio::test]
async fn dropping_an_in_flight_send_clears_awaiting() {
    let mut session = ConversationSession::new();

    let timed_out = tokio::time::timeout(
        Duration::from_millis(50),
        session.send_user_message("Hello", &PendingForeverResponder),
    )
    .await;

    assert!(timed_out.is_err());
    assert!(!session.is_awaiting_reply());
    assert_eq!(transcript(&session), vec![(Sender::User, "Hello")]);
    assert_eq!(session.last_error(), None);
}

#[test]
fn begin_send_while_awaiting_is_rejected_without_state_change() {
    let mut session = ConversationSession::new();
    let pending = session.begin_send("first").expect("begin");
    assert_eq!(pending.request.history, "USER:first");

    let err = session.begin_send("second").expect_err("busy");
    assert_eq!(err, ChatError::AlreadyAwaiting);
    assert_eq!(session.messages().len(), 1);
    assert!(session.is_awaiting_reply());

    session
        .complete_send(Ok("reply".to_string()))
        .expect("complete");
    assert!(!session.is_awaiting_reply());
    assert_eq!(session.messages().len(), 2);
}

#[test]
fn complete_send_failure_sets_banner_and_clears_awaiting() {
    let mut session = ConversationSession::new();
    session.begin_send("Hello").expect("begin");

    let err = session
        .complete_send(Err(ChatError::request_failed("HTTP error! status: 404")))
        .expect_err("failure");

    assert_eq!(err.code(), shared::error::ErrorCode::Transport);
    assert!(!session.is_awaiting_reply());
    assert_eq!(
        session.last_error(),
        Some("An error occurred while processing your request. Please try again. Error: HTTP error! status: 404")
    );
    assert_eq!(session.messages().len(), 1);
}

#[test]
fn reset_leaves_only_the_opening_line() {
    let mut session = ConversationSession::new();
    session.append_responder_message("one");
    session.append_responder_message("two");
    session.begin_send("three").expect("begin");
    session.complete_send(Ok("four".to_string())).expect("complete");

    session.reset("fresh start");

    assert_eq!(transcript(&session), vec![(Sender::Responder, "fresh start")]);
}

#[test]
fn quick_actions_post_responder_messages_without_a_request() {
    let mut session = ConversationSession::new();
    session.append_responder_message("old");

    session.apply_quick_action(QuickAction::Start);
    session.apply_quick_action(QuickAction::Bump1);
    session.apply_quick_action(QuickAction::Bump3);

    assert_eq!(
        transcript(&session),
        vec![
            (Sender::Responder, QuickAction::Start.script()),
            (Sender::Responder, QuickAction::Bump1.script()),
            (Sender::Responder, QuickAction::Bump3.script()),
        ]
    );
    assert!(!session.is_awaiting_reply());
}

#[test]
fn message_ids_stay_unique_across_resets() {
    let mut session = ConversationSession::new();
    let first = session.append_responder_message("a");
    let second = session.reset("b");
    let third = session.append_responder_message("c");

    assert!(first < second && second < third);
    let ids: Vec<_> = session.messages().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![second, third]);
}

#[test]
fn status_channel_tracks_error_lifecycle() {
    let mut session = ConversationSession::new();
    let status = session.subscribe();

    session.begin_send("Hello").expect("begin");
    let _ = session.complete_send(Err(ChatError::request_failed("offline")));
    assert!(status.borrow().last_error.is_some());

    session.begin_send("again").expect("begin");
    assert_eq!(status.borrow().last_error, None);
    assert!(status.borrow().is_awaiting_reply);
}
