//! Percentage scoring and the finished-game summary.

use serde::{Deserialize, Serialize};

use crate::game::Tally;

/// Share of correct answers as a percentage with two decimals.
///
/// Returns a bare `"0"` (not `"0.00"`) when no question has been issued.
/// Ties on the second decimal round up (`1/32` is `"3.13"`).
pub fn percentage(correct_answers: u32, total_questions: u32) -> String {
    if total_questions == 0 {
        return "0".to_string();
    }
    let correct = u64::from(correct_answers);
    let total = u64::from(total_questions);
    // Hundredths of a percent, rounded half-up on the exact fraction.
    let hundredths = (correct * 20_000 + total) / (2 * total);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// Results shown once a game is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResults {
    pub final_score: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub questions_answered: u32,
    pub percentage: String,
}

impl GameResults {
    pub fn from_tally(tally: &Tally) -> Self {
        Self {
            final_score: tally.score(),
            correct_answers: tally.correct_answers,
            total_questions: tally.total_questions,
            questions_answered: tally.questions_answered,
            percentage: percentage(tally.correct_answers, tally.total_questions),
        }
    }
}
