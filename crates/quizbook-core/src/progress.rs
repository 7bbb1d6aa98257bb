//! Progress aggregation.
//!
//! Summary statistics are recomputed from the content model and the answer
//! store on every call. Nothing here is cached: the answer store's graded
//! field is the single source of truth for correctness, so two calls
//! without an intervening mutation always agree.
//!
//! Accuracy counts only graded records in its denominator; a selected but
//! unchecked answer contributes to `attempted` (and the progress bar) but
//! not to accuracy.

use serde::{Deserialize, Serialize};

use crate::content::Book;
use crate::persist::Identity;
use crate::store::AnswerStore;

/// A point-in-time summary of the learner's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub total_questions: usize,
    /// Questions with any recorded interaction.
    pub attempted: usize,
    /// Questions with a grading outcome.
    pub graded: usize,
    pub correct_answers: usize,
    /// Integer percentage, correct over graded. Zero when nothing is graded.
    pub accuracy: u32,
    /// Integer percentage, attempted over total.
    pub progress_percent: u32,
    pub chapters_completed: usize,
    pub current_chapter: usize,
    pub user_name: String,
    pub user_itqan_id: String,
}

/// Compute a progress snapshot. Pure: same inputs, same output.
pub fn snapshot(
    book: &Book,
    answers: &AnswerStore,
    current_chapter: usize,
    identity: Option<&Identity>,
) -> ProgressSnapshot {
    let total_questions = book.total_questions();
    let attempted = answers.attempted();
    let graded = answers.graded();
    let correct_answers = answers.correct();

    ProgressSnapshot {
        total_questions,
        attempted,
        graded,
        correct_answers,
        accuracy: percent(correct_answers, graded),
        progress_percent: percent(attempted, total_questions),
        chapters_completed: answers.chapters_completed(book),
        current_chapter,
        user_name: identity.map(|i| i.name.clone()).unwrap_or_default(),
        user_itqan_id: identity.map(|i| i.itqan_id.clone()).unwrap_or_default(),
    }
}

/// Rounded integer percentage, zero when the denominator is zero.
fn percent(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (numerator as f64 / denominator as f64 * 100.0).round() as u32
}
