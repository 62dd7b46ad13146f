use async_trait::async_trait;
use reqwest::Client;
use shared::{error::ChatError, protocol::WebhookRequest};
use tracing::{info, warn};

pub const DEFAULT_WEBHOOK_URL: &str = "https://hook.eu2.make.com/x9st4xqy57d7yf2wkobqvbzjv19cmj32";

/// Produces the reply text for one submitted user message.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, request: &WebhookRequest) -> Result<String, ChatError>;
}

/// Posts the message and flattened history as JSON and takes the response
/// body verbatim as the reply.
pub struct WebhookResponder {
    http: Client,
    webhook_url: String,
}

impl WebhookResponder {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), webhook_url)
    }

    pub fn with_client(http: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            http,
            webhook_url: webhook_url.into(),
        }
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

impl Default for WebhookResponder {
    fn default() -> Self {
        Self::new(DEFAULT_WEBHOOK_URL)
    }
}

#[async_trait]
impl Responder for WebhookResponder {
    async fn respond(&self, request: &WebhookRequest) -> Result<String, ChatError> {
        info!(
            text_len = request.message.len(),
            history_len = request.history.len(),
            "responder: posting message"
        );

        let response = self
            .http
            .post(&self.webhook_url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!("responder: transport failure: {err}");
                ChatError::request_failed(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "responder: non-success status");
            return Err(ChatError::request_failed(format!(
                "HTTP error! status: {}",
                status.as_u16()
            )));
        }

        // Body is taken as-is; non-UTF-8 bytes are replaced rather than rejected.
        let body = response.bytes().await.map_err(|err| {
            warn!("responder: failed to read body: {err}");
            ChatError::request_failed(err.to_string())
        })?;
        info!(
            status = status.as_u16(),
            reply_len = body.len(),
            "responder: reply received"
        );
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
#[path = "tests/responder_tests.rs"]
mod tests;
