//! Pure grading rules.
//!
//! `grade` evaluates a candidate answer against a question and decides
//! correctness. It has no side effects and no access to the answer store;
//! the store enforces the at-most-once transition into a graded state.

use serde::{Deserialize, Serialize};

use crate::content::{CorrectAnswer, Question, QuestionKind};
use crate::error::GradeError;

/// The learner's submitted value. Shape depends on the question kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAnswer {
    /// Selected option index (choice kinds).
    Choice(usize),
    /// Typed text (fill-in-blank).
    Text(String),
    /// Drop-zone state (drag-drop).
    Slots(SlotFill),
}

/// Drag-drop answer state: the ordered drop-zone contents plus whichever
/// tokens have not been placed yet. Partial placement is a valid recorded
/// answer; it only fails at grading time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFill {
    pub slots: Vec<Option<String>>,
    pub remaining: Vec<String>,
}

impl SlotFill {
    /// A fresh fill with every slot empty and all tokens undropped.
    pub fn empty(slot_count: usize, items: &[String]) -> Self {
        Self {
            slots: vec![None; slot_count],
            remaining: items.to_vec(),
        }
    }

    /// Place an undropped token into a slot. A token already occupying the
    /// slot returns to the undropped pool. Returns `false` when the
    /// position is out of range or the token is not available.
    pub fn place(&mut self, position: usize, token: &str) -> bool {
        if position >= self.slots.len() {
            return false;
        }
        let Some(at) = self.remaining.iter().position(|t| t == token) else {
            return false;
        };
        let token = self.remaining.remove(at);
        if let Some(displaced) = self.slots[position].replace(token) {
            self.remaining.push(displaced);
        }
        true
    }

    /// Empty a slot, returning its token to the undropped pool. Returns
    /// `false` when the position is out of range or already empty.
    pub fn clear(&mut self, position: usize) -> bool {
        match self.slots.get_mut(position) {
            Some(slot) => match slot.take() {
                Some(token) => {
                    self.remaining.push(token);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

/// Outcome of grading a complete answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Grade a candidate answer against a question.
///
/// Incomplete answers (empty text, unfilled slots) fail with
/// `IncompleteAnswer` rather than grading as incorrect. Same inputs always
/// produce the same output.
pub fn grade(question: &Question, answer: &RawAnswer) -> Result<Verdict, GradeError> {
    match (question.kind, answer) {
        (QuestionKind::MultipleChoice | QuestionKind::ReadingPassage, RawAnswer::Choice(i)) => {
            grade_choice(question, *i)
        }
        (QuestionKind::FillInBlank, RawAnswer::Text(s)) => grade_text(question, s),
        (QuestionKind::DragDrop, RawAnswer::Slots(fill)) => grade_slots(question, fill),
        _ => Err(GradeError::AnswerMismatch {
            expected: question.kind,
        }),
    }
}

fn grade_choice(question: &Question, selected: usize) -> Result<Verdict, GradeError> {
    let correct = match &question.correct {
        CorrectAnswer::Index(i) => selected == *i,
        CorrectAnswer::IndexSet(set) => set.contains(&selected),
        _ => {
            return Err(GradeError::AnswerMismatch {
                expected: question.kind,
            })
        }
    };
    Ok(verdict(correct))
}

fn grade_text(question: &Question, text: &str) -> Result<Verdict, GradeError> {
    let submitted = text.trim();
    if submitted.is_empty() {
        return Err(GradeError::IncompleteAnswer);
    }
    let submitted = submitted.to_lowercase();

    let correct = match &question.correct {
        CorrectAnswer::Text(expected) => submitted == expected.trim().to_lowercase(),
        CorrectAnswer::TextSet(set) => set
            .iter()
            .any(|expected| submitted == expected.trim().to_lowercase()),
        _ => {
            return Err(GradeError::AnswerMismatch {
                expected: question.kind,
            })
        }
    };
    Ok(verdict(correct))
}

fn grade_slots(question: &Question, fill: &SlotFill) -> Result<Verdict, GradeError> {
    if !fill.is_complete() || fill.slots.is_empty() {
        return Err(GradeError::IncompleteAnswer);
    }
    let CorrectAnswer::Sequence(expected) = &question.correct else {
        return Err(GradeError::AnswerMismatch {
            expected: question.kind,
        });
    };

    let filled: Vec<&String> = fill.slots.iter().flatten().collect();
    let correct =
        filled.len() == expected.len() && filled.iter().zip(expected).all(|(a, b)| *a == b);
    Ok(verdict(correct))
}

fn verdict(correct: bool) -> Verdict {
    if correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_question(correct: CorrectAnswer) -> Question {
        Question {
            prompt: "pick one".into(),
            kind: QuestionKind::MultipleChoice,
            options: vec!["a".into(), "b".into(), "c".into()],
            items: vec![],
            correct,
            feedback: None,
        }
    }

    fn text_question(correct: CorrectAnswer) -> Question {
        Question {
            prompt: "type it".into(),
            kind: QuestionKind::FillInBlank,
            options: vec![],
            items: vec![],
            correct,
            feedback: None,
        }
    }

    fn drag_question(items: &[&str], correct: &[&str]) -> Question {
        Question {
            prompt: "order these".into(),
            kind: QuestionKind::DragDrop,
            options: vec![],
            items: items.iter().map(|s| s.to_string()).collect(),
            correct: CorrectAnswer::Sequence(correct.iter().map(|s| s.to_string()).collect()),
            feedback: None,
        }
    }

    #[test]
    fn choice_scalar_correct() {
        let q = choice_question(CorrectAnswer::Index(1));
        assert_eq!(grade(&q, &RawAnswer::Choice(1)), Ok(Verdict::Correct));
        assert_eq!(grade(&q, &RawAnswer::Choice(0)), Ok(Verdict::Incorrect));
        assert_eq!(grade(&q, &RawAnswer::Choice(2)), Ok(Verdict::Incorrect));
    }

    #[test]
    fn choice_set_correct() {
        let q = choice_question(CorrectAnswer::IndexSet(vec![0, 2]));
        assert_eq!(grade(&q, &RawAnswer::Choice(0)), Ok(Verdict::Correct));
        assert_eq!(grade(&q, &RawAnswer::Choice(2)), Ok(Verdict::Correct));
        assert_eq!(grade(&q, &RawAnswer::Choice(1)), Ok(Verdict::Incorrect));
    }

    #[test]
    fn text_case_insensitive() {
        let q = text_question(CorrectAnswer::Text("Paris".into()));
        assert_eq!(
            grade(&q, &RawAnswer::Text("paris".into())),
            Ok(Verdict::Correct)
        );
        assert_eq!(
            grade(&q, &RawAnswer::Text("  PARIS  ".into())),
            Ok(Verdict::Correct)
        );
        assert_eq!(
            grade(&q, &RawAnswer::Text("London".into())),
            Ok(Verdict::Incorrect)
        );
    }

    #[test]
    fn text_set_matches_any() {
        let q = text_question(CorrectAnswer::TextSet(vec!["color".into(), "colour".into()]));
        assert_eq!(
            grade(&q, &RawAnswer::Text("Colour".into())),
            Ok(Verdict::Correct)
        );
        assert_eq!(
            grade(&q, &RawAnswer::Text("shade".into())),
            Ok(Verdict::Incorrect)
        );
    }

    #[test]
    fn text_empty_is_incomplete() {
        let q = text_question(CorrectAnswer::Text("Paris".into()));
        assert_eq!(
            grade(&q, &RawAnswer::Text("   ".into())),
            Err(GradeError::IncompleteAnswer)
        );
    }

    #[test]
    fn slots_partial_fill_is_incomplete() {
        let q = drag_question(&["I", "am"], &["I", "am"]);
        let mut fill = SlotFill::empty(2, &q.items);
        assert!(fill.place(0, "I"));
        assert_eq!(
            grade(&q, &RawAnswer::Slots(fill)),
            Err(GradeError::IncompleteAnswer)
        );
    }

    #[test]
    fn slots_exact_order_required() {
        let q = drag_question(&["I", "am", "here"], &["I", "am", "here"]);

        let mut fill = SlotFill::empty(3, &q.items);
        assert!(fill.place(0, "I"));
        assert!(fill.place(1, "am"));
        assert!(fill.place(2, "here"));
        assert_eq!(grade(&q, &RawAnswer::Slots(fill)), Ok(Verdict::Correct));

        let mut permuted = SlotFill::empty(3, &q.items);
        assert!(permuted.place(0, "am"));
        assert!(permuted.place(1, "I"));
        assert!(permuted.place(2, "here"));
        assert_eq!(
            grade(&q, &RawAnswer::Slots(permuted)),
            Ok(Verdict::Incorrect)
        );
    }

    #[test]
    fn slot_fill_place_and_clear() {
        let items: Vec<String> = vec!["a".into(), "b".into()];
        let mut fill = SlotFill::empty(2, &items);

        assert!(!fill.place(5, "a"), "out-of-range position");
        assert!(!fill.place(0, "z"), "unknown token");

        assert!(fill.place(0, "a"));
        assert_eq!(fill.remaining, vec!["b".to_string()]);

        // Dropping onto an occupied slot releases the occupant.
        assert!(fill.place(0, "b"));
        assert_eq!(fill.remaining, vec!["a".to_string()]);
        assert_eq!(fill.slots[0].as_deref(), Some("b"));

        assert!(fill.clear(0));
        assert!(!fill.clear(0), "slot already empty");
        assert_eq!(fill.remaining.len(), 2);
    }

    #[test]
    fn mismatched_answer_shape_is_a_defect() {
        let q = drag_question(&["a"], &["a"]);
        let err = grade(&q, &RawAnswer::Text("a".into())).unwrap_err();
        assert_eq!(
            err,
            GradeError::AnswerMismatch {
                expected: QuestionKind::DragDrop
            }
        );
        assert!(err.is_defect());
    }

    #[test]
    fn grading_is_idempotent() {
        let q = choice_question(CorrectAnswer::Index(1));
        let answer = RawAnswer::Choice(1);
        assert_eq!(grade(&q, &answer), grade(&q, &answer));
    }

    #[test]
    fn raw_answer_serde_shapes() {
        let choice: RawAnswer = serde_json::from_str("2").unwrap();
        assert_eq!(choice, RawAnswer::Choice(2));

        let text: RawAnswer = serde_json::from_str("\"Paris\"").unwrap();
        assert_eq!(text, RawAnswer::Text("Paris".into()));

        let slots: RawAnswer =
            serde_json::from_str(r#"{"slots": ["a", null], "remaining": ["b"]}"#).unwrap();
        assert_eq!(
            slots,
            RawAnswer::Slots(SlotFill {
                slots: vec![Some("a".into()), None],
                remaining: vec!["b".into()],
            })
        );
    }
}
