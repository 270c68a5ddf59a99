pub mod answer;
pub mod command;
pub mod engine;
pub mod replies;
pub mod transcript;

use std::io::Read;

use thiserror::Error;

pub use engine::{reset_session, ChatTurn, ClearedSession, Mode, QuizEngine, SessionState};
pub use transcript::{Role, TranscriptEntry, TranscriptItem};

#[derive(Debug, Error)]
pub enum BankError {
    #[error("question bank has no questions")]
    Empty,
    #[error("question {index} has an expected answer that can never be matched: {answer:?}")]
    UnmatchableAnswer { index: usize, answer: String },
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One quiz question. `expected_answer` is kept in its canonical lowercase form.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestionRecord {
    pub prompt: String,
    pub expected_answer: String,
    pub explanation: String,
}

impl QuestionRecord {
    pub fn new(prompt: &str, expected_answer: &str, explanation: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            expected_answer: expected_answer.to_string(),
            explanation: explanation.to_string(),
        }
    }
}

/// Ordered, immutable list of questions. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        if let Some((index, question)) = questions
            .iter()
            .enumerate()
            .find(|(_, q)| answer::normalize(q.expected_answer.as_str()).is_empty())
        {
            return Err(BankError::UnmatchableAnswer {
                index,
                answer: question.expected_answer.clone(),
            });
        }

        Ok(Self { questions })
    }

    /// Reads a JSON array of `{prompt, expected_answer, explanation}` objects.
    pub fn from_reader(reader: impl Read) -> Result<Self, BankError> {
        let questions: Vec<QuestionRecord> = serde_json::from_reader(reader)?;
        Self::new(questions)
    }

    /// The built-in five question general-knowledge bank.
    pub fn general_knowledge() -> Self {
        Self {
            questions: vec![
                QuestionRecord::new(
                    "Which is the largest ocean on Earth?",
                    "pacific ocean",
                    "The Pacific Ocean is the largest ocean, covering more than 30% of Earth's surface.",
                ),
                QuestionRecord::new(
                    "Who wrote the play 'Romeo and Juliet'?",
                    "william shakespeare",
                    "William Shakespeare wrote 'Romeo and Juliet' — one of his most famous tragedies.",
                ),
                QuestionRecord::new(
                    "What is the chemical symbol for water?",
                    "h2o",
                    "Water's chemical formula is H₂O, meaning two hydrogen atoms bonded to one oxygen atom.",
                ),
                QuestionRecord::new(
                    "Which planet is known as the Red Planet?",
                    "mars",
                    "Mars is called the Red Planet because of iron oxide (rust) on its surface which gives it a reddish appearance.",
                ),
                QuestionRecord::new(
                    "What is the capital city of Japan?",
                    "tokyo",
                    "Tokyo is the capital and largest city of Japan.",
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.questions.iter()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::general_knowledge()
    }
}
