use super::answer::title_case;
use super::QuestionRecord;

pub const STOPPED_TEXT: &str = "Quiz stopped. You can type 'start quiz' to try again anytime!";

pub const HELP_TEXT: &str = "I can run a small GK quiz for you. Commands:\n\
- 'start quiz' or 'quiz' to begin\n\
- Answer questions directly when asked\n\
- 'quit' or 'stop' to end the quiz\n\
Or just chat normally (say hi).";

pub const GREETING_TEXT: &str =
    "Hello! I can run a GK quiz for you — type 'start quiz' to begin. Or ask me something.";
pub const THANKS_TEXT: &str = "You're welcome! 😊 If you'd like to try a quiz, type 'start quiz'.";
pub const FALLBACK_TEXT: &str =
    "I can help with a small GK quiz. Type 'start quiz' to begin or say 'help' for commands.";

pub const PERFECT_SCORE_TEXT: &str = "Excellent! Perfect score — you're a quiz master! 👏";
pub const GOOD_SCORE_TEXT: &str =
    "Well done! You did a good job — keep practicing to get perfect.";
pub const RETRY_TEXT: &str =
    "Nice attempt — try again to improve. You can type 'start quiz' to retry.";

pub fn quiz_started(first: &QuestionRecord) -> String {
    format!("Great — starting the GK quiz! Question 1: {}", first.prompt)
}

pub fn correct_answer(question: &QuestionRecord) -> String {
    format!("🎉 Correct! {} Good job! 👍", question.explanation)
}

pub fn wrong_answer(question: &QuestionRecord) -> String {
    format!(
        "❌ That's not correct. The correct answer is: {}. {}",
        title_case(&question.expected_answer),
        question.explanation
    )
}

/// `number` is 1-based.
pub fn next_question(number: usize, total: usize, question: &QuestionRecord) -> String {
    format!("Next question ({}/{}): {}", number, total, question.prompt)
}

pub fn final_score(score: usize, total: usize) -> String {
    format!("🏁 Quiz finished! Your score: {}/{}.", score, total)
}

/// Closing remark picked by score band.
pub fn score_band(score: usize, total: usize) -> &'static str {
    if score == total {
        PERFECT_SCORE_TEXT
    } else if score >= total / 2 {
        GOOD_SCORE_TEXT
    } else {
        RETRY_TEXT
    }
}
