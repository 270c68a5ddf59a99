use log::{debug, warn};

use super::answer::is_correct;
use super::command::{ChatIntent, Command};
use super::replies;
use super::transcript::{normalize_transcript, Role, TranscriptEntry, TranscriptItem};
use super::QuestionBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Quiz,
}

/// Per-session quiz progress. Owned by the caller between turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Quiz {
        question_index: usize,
        score: usize,
    },
}

impl SessionState {
    pub fn mode(&self) -> Mode {
        match self {
            SessionState::Idle => Mode::Idle,
            SessionState::Quiz { .. } => Mode::Quiz,
        }
    }

    pub fn question_index(&self) -> Option<usize> {
        match self {
            SessionState::Idle => None,
            SessionState::Quiz { question_index, .. } => Some(*question_index),
        }
    }

    pub fn score(&self) -> usize {
        match self {
            SessionState::Idle => 0,
            SessionState::Quiz { score, .. } => *score,
        }
    }
}

/// What the "clear" action hands back to the chat surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedSession {
    pub transcript: Vec<TranscriptEntry>,
    pub input: String,
    pub state: SessionState,
}

pub fn reset_session() -> ClearedSession {
    ClearedSession::default()
}

/// Assistant replies of one turn, in order, with the state to keep for the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub state: SessionState,
    pub replies: Vec<String>,
}

/// Rule-based quiz conversation over a fixed question bank.
///
/// The engine keeps no per-session data: every turn takes the prior
/// transcript and state and returns the extended transcript and the next state.
#[derive(Debug, Clone, Default)]
pub struct QuizEngine {
    bank: QuestionBank,
}

impl QuizEngine {
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Runs one conversational turn.
    ///
    /// Dispatch order: commands, then a quiz answer if a question is pending,
    /// then free chat. `None` state is the default idle state. Returns the
    /// full transcript, not just the new entries.
    pub fn process_turn<I>(
        &self,
        user_message: &str,
        transcript: I,
        state: Option<SessionState>,
    ) -> (Vec<TranscriptEntry>, SessionState)
    where
        I: IntoIterator,
        I::Item: Into<TranscriptItem>,
    {
        let mut transcript = normalize_transcript(transcript);
        let state = state.unwrap_or_default();

        let next = if let Some(command) = Command::parse(user_message) {
            debug!("command {:?} in state {:?}", command, state);
            self.run_command(command, user_message, &mut transcript, state)
        } else if let Some((question_index, score)) = self.pending_question(state) {
            self.evaluate_answer(user_message, question_index, score, &mut transcript)
        } else {
            self.chat(user_message, &mut transcript)
        };

        (transcript, next)
    }

    /// Same as `process_turn` with no prior transcript, keeping only what the
    /// assistant says.
    pub fn reply_to(&self, user_message: &str, state: Option<SessionState>) -> ChatTurn {
        let (transcript, state) =
            self.process_turn(user_message, Vec::<TranscriptEntry>::new(), state);
        let replies = transcript
            .into_iter()
            .filter(|entry| entry.role == Role::Assistant)
            .map(|entry| entry.content)
            .collect();
        ChatTurn { state, replies }
    }

    fn pending_question(&self, state: SessionState) -> Option<(usize, usize)> {
        match state {
            SessionState::Quiz {
                question_index,
                score,
            } if question_index < self.bank.len() => Some((question_index, score)),
            SessionState::Quiz { question_index, .. } => {
                warn!(
                    "quiz state points at question {} of {}, treating session as idle",
                    question_index,
                    self.bank.len()
                );
                None
            }
            SessionState::Idle => None,
        }
    }

    fn run_command(
        &self,
        command: Command,
        user_message: &str,
        transcript: &mut Vec<TranscriptEntry>,
        state: SessionState,
    ) -> SessionState {
        transcript.push(TranscriptEntry::user(user_message));
        match command {
            Command::StartQuiz => match self.bank.get(0) {
                Some(first) => {
                    transcript.push(TranscriptEntry::assistant(replies::quiz_started(first)));
                    SessionState::Quiz {
                        question_index: 0,
                        score: 0,
                    }
                }
                // A constructed bank is never empty.
                None => {
                    transcript.push(TranscriptEntry::assistant(replies::FALLBACK_TEXT));
                    SessionState::Idle
                }
            },
            Command::Stop => {
                transcript.push(TranscriptEntry::assistant(replies::STOPPED_TEXT));
                SessionState::Idle
            }
            Command::Help => {
                transcript.push(TranscriptEntry::assistant(replies::HELP_TEXT));
                state
            }
        }
    }

    fn evaluate_answer(
        &self,
        user_message: &str,
        question_index: usize,
        mut score: usize,
        transcript: &mut Vec<TranscriptEntry>,
    ) -> SessionState {
        transcript.push(TranscriptEntry::user(user_message));

        let total = self.bank.len();
        if let Some(question) = self.bank.get(question_index) {
            if is_correct(user_message, &question.expected_answer) {
                score += 1;
                transcript.push(TranscriptEntry::assistant(replies::correct_answer(question)));
            } else {
                transcript.push(TranscriptEntry::assistant(replies::wrong_answer(question)));
            }
        }

        let next_index = question_index + 1;
        match self.bank.get(next_index) {
            Some(next) => {
                debug!("advancing to question {}/{} with score {}", next_index + 1, total, score);
                transcript.push(TranscriptEntry::assistant(replies::next_question(
                    next_index + 1,
                    total,
                    next,
                )));
                SessionState::Quiz {
                    question_index: next_index,
                    score,
                }
            }
            None => {
                debug!("quiz finished with score {}/{}", score, total);
                transcript.push(TranscriptEntry::assistant(replies::final_score(score, total)));
                transcript.push(TranscriptEntry::assistant(replies::score_band(score, total)));
                SessionState::Idle
            }
        }
    }

    fn chat(&self, user_message: &str, transcript: &mut Vec<TranscriptEntry>) -> SessionState {
        transcript.push(TranscriptEntry::user(user_message));
        let reply = match ChatIntent::classify(user_message) {
            ChatIntent::Greeting => replies::GREETING_TEXT,
            ChatIntent::Thanks => replies::THANKS_TEXT,
            ChatIntent::Other => replies::FALLBACK_TEXT,
        };
        transcript.push(TranscriptEntry::assistant(reply));
        SessionState::Idle
    }
}
