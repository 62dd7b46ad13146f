//! Canned responder-side prompts exposed as one-click actions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickAction {
    Start,
    Bump1,
    Bump2,
    Bump3,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        QuickAction::Start,
        QuickAction::Bump1,
        QuickAction::Bump2,
        QuickAction::Bump3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuickAction::Start => "Start",
            QuickAction::Bump1 => "Bump 1",
            QuickAction::Bump2 => "Bump 2",
            QuickAction::Bump3 => "Bump 3",
        }
    }

    pub fn script(self) -> &'static str {
        match self {
            QuickAction::Start => "Hi there [First Name]! I'm Chloe from Prime Location Properties. What brings you to explore Dubai's real estate market today?",
            QuickAction::Bump1 => "Just bumping this up in case you got busy before :)",
            QuickAction::Bump2 => "Do you still want help?",
            QuickAction::Bump3 => {
                "I must have the wrong number. Apologies. I will remove your number. Thanks"
            }
        }
    }

    /// Start clears the transcript before posting its script; bumps append.
    pub fn resets_transcript(self) -> bool {
        matches!(self, QuickAction::Start)
    }

    /// Parses the slash command form used by the terminal front end.
    pub fn from_command(command: &str) -> Option<Self> {
        match command.trim().to_ascii_lowercase().as_str() {
            "/start" => Some(QuickAction::Start),
            "/bump1" => Some(QuickAction::Bump1),
            "/bump2" => Some(QuickAction::Bump2),
            "/bump3" => Some(QuickAction::Bump3),
            _ => None,
        }
    }
}
