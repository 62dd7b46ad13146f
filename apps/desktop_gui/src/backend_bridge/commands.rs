//! Backend commands queued from UI to backend worker.

use shared::protocol::WebhookRequest;

#[derive(Debug)]
pub enum BackendCommand {
    SendMessage { request: WebhookRequest },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SendMessage { .. } => "send_message",
        }
    }
}
