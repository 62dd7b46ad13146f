use shared::domain::ChatMessage;

pub const TRANSCRIPT_SEPARATOR: &str = " -- ";

/// Flattens the conversation into `SENDER:text` entries joined by
/// [`TRANSCRIPT_SEPARATOR`]. Message text is passed through verbatim, so a
/// separator inside a message is indistinguishable from a real boundary.
pub fn format_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|message| format!("{}:{}", message.sender.transcript_tag(), message.text))
        .collect::<Vec<_>>()
        .join(TRANSCRIPT_SEPARATOR)
}
