use serde::{Deserialize, Serialize};

/// JSON body posted to the responder webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub message: String,
    pub history: String,
}

impl WebhookRequest {
    pub fn new(message: impl Into<String>, history: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: history.into(),
        }
    }
}
