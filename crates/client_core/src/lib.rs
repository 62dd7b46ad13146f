pub mod quick_actions;
pub mod responder;
pub mod session;
pub mod settings;
pub mod transcript;

pub use quick_actions::QuickAction;
pub use responder::{Responder, WebhookResponder, DEFAULT_WEBHOOK_URL};
pub use session::{ConversationSession, PendingSend, SessionSnapshot};
pub use settings::{load_settings, Settings, SettingsError};
pub use transcript::{format_transcript, TRANSCRIPT_SEPARATOR};
