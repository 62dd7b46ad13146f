use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(MessageId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Responder,
}

impl Sender {
    /// Upper-cased tag used when flattening a transcript.
    pub fn transcript_tag(self) -> &'static str {
        match self {
            Sender::User => "USER",
            Sender::Responder => "AI",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Responder => "AI",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}
