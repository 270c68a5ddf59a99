/// Commands recognised in any state. They win over quiz answers, so "stop"
/// mid-quiz always stops instead of being scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartQuiz,
    Stop,
    Help,
}

impl Command {
    /// Dispatch priority, highest first.
    pub const PRIORITY: [Command; 3] = [Command::StartQuiz, Command::Stop, Command::Help];

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Command::StartQuiz => &["start quiz", "quiz", "start"],
            Command::Stop => &["quit", "stop", "exit"],
            Command::Help => &["help", "commands"],
        }
    }

    /// Exact match on the trimmed, lowercased input.
    pub fn parse(input: &str) -> Option<Command> {
        let cmd = input.trim().to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|command| command.aliases().iter().any(|alias| *alias == cmd))
    }
}

/// What a free-text message outside a quiz looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatIntent {
    Greeting,
    Thanks,
    Other,
}

const GREETING_WORDS: [&str; 3] = ["hi", "hello", "hey"];

impl ChatIntent {
    // Plain substring checks, so "this" counts as a greeting.
    pub fn classify(input: &str) -> ChatIntent {
        let low = input.trim().to_lowercase();
        if GREETING_WORDS.iter().any(|g| low.contains(g)) {
            ChatIntent::Greeting
        } else if low.contains("thank") {
            ChatIntent::Thanks
        } else {
            ChatIntent::Other
        }
    }
}
