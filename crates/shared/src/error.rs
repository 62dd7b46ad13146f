use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix shown in the error banner ahead of the failure description.
pub const REQUEST_FAILED_BANNER_PREFIX: &str =
    "An error occurred while processing your request. Please try again. Error: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Busy,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyInput,
    #[error("a reply is already pending")]
    AlreadyAwaiting,
    #[error("{description}")]
    RequestFailed { description: String },
}

impl ChatError {
    pub fn request_failed(description: impl Into<String>) -> Self {
        Self::RequestFailed {
            description: description.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::EmptyInput => ErrorCode::Validation,
            ChatError::AlreadyAwaiting => ErrorCode::Busy,
            ChatError::RequestFailed { .. } => ErrorCode::Transport,
        }
    }

    /// Text for the error banner; `None` for failures that are silently ignored.
    pub fn banner_text(&self) -> Option<String> {
        match self {
            ChatError::RequestFailed { description } => {
                Some(format!("{REQUEST_FAILED_BANNER_PREFIX}{description}"))
            }
            ChatError::EmptyInput | ChatError::AlreadyAwaiting => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatError, ErrorCode};

    #[test]
    fn request_failed_banner_embeds_description() {
        let err = ChatError::request_failed("HTTP error! status: 502");
        assert_eq!(err.code(), ErrorCode::Transport);
        let banner = err.banner_text().expect("banner");
        assert!(banner.starts_with("An error occurred"));
        assert!(banner.ends_with("HTTP error! status: 502"));
    }

    #[test]
    fn empty_input_is_silent() {
        assert_eq!(ChatError::EmptyInput.banner_text(), None);
        assert_eq!(ChatError::EmptyInput.code(), ErrorCode::Validation);
    }
}
