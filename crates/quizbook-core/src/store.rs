//! The answer store: per-question answer state and grading outcomes.
//!
//! The store owns the at-most-once grading invariant. Grading itself is
//! delegated to `grading::grade`; the store records the outcome and locks
//! the record. Selection never implies grading.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::{Book, Chapter, Question, QuestionId};
use crate::error::GradeError;
use crate::grading::{grade, RawAnswer, Verdict};

/// Grading state of an answer record. `Ungraded` means the learner has
/// selected or typed something but has not checked it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Graded {
    Ungraded,
    Correct,
    Incorrect,
}

impl Graded {
    pub fn is_graded(self) -> bool {
        !matches!(self, Graded::Ungraded)
    }

    pub fn is_correct(self) -> bool {
        matches!(self, Graded::Correct)
    }
}

impl From<Verdict> for Graded {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Correct => Graded::Correct,
            Verdict::Incorrect => Graded::Incorrect,
        }
    }
}

/// Per-question state: the submitted value and its grading outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub answer: RawAnswer,
    pub graded: Graded,
}

/// Mapping from question identity to the learner's answer record.
///
/// A record exists for a question iff the learner has interacted with it.
/// `BTreeMap` keeps iteration and serialization in book order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    records: BTreeMap<QuestionId, AnswerRecord>,
}

/// Result of a batched whole-chapter check.
#[derive(Debug, Clone, Default)]
pub struct ChapterCheckReport {
    /// Questions graded by this check, with their verdicts.
    pub graded: Vec<(QuestionId, Verdict)>,
    /// Questions that were already graded before this check.
    pub already_graded: Vec<QuestionId>,
    /// Questions with no complete answer; the learner must finish them.
    pub incomplete: Vec<QuestionId>,
}

impl ChapterCheckReport {
    /// True when nothing in the chapter is left ungraded.
    pub fn chapter_done(&self) -> bool {
        self.incomplete.is_empty()
    }
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the learner's current answer for an ungraded
    /// question. Rejected with `AlreadyGraded` once the record is graded:
    /// answers lock after checking. Drag-drop intermediate placement goes
    /// through here too and never touches the grading state.
    pub fn record_selection(
        &mut self,
        id: QuestionId,
        answer: RawAnswer,
    ) -> Result<(), GradeError> {
        if let Some(record) = self.records.get(&id) {
            if record.graded.is_graded() {
                tracing::warn!(%id, "selection rejected: answer is locked");
                return Err(GradeError::AlreadyGraded);
            }
        }
        self.records.insert(
            id,
            AnswerRecord {
                answer,
                graded: Graded::Ungraded,
            },
        );
        Ok(())
    }

    /// Grade the stored answer for a question and lock in the outcome.
    ///
    /// Fails with `IncompleteAnswer` when there is no record or the answer
    /// is incomplete (no mutation happens), and with `AlreadyGraded` when
    /// the record already carries an outcome.
    pub fn check_and_grade(
        &mut self,
        id: QuestionId,
        question: &Question,
    ) -> Result<Verdict, GradeError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(GradeError::IncompleteAnswer)?;
        if record.graded.is_graded() {
            tracing::warn!(%id, "check rejected: question is already graded");
            return Err(GradeError::AlreadyGraded);
        }

        let verdict = grade(question, &record.answer)?;
        record.graded = verdict.into();
        Ok(verdict)
    }

    /// Check every question in a chapter at once.
    ///
    /// Grades what it can: already-graded questions are reported but left
    /// untouched, and questions with incomplete answers are listed for the
    /// learner to finish. Partial completion is not an error; only defect
    /// class failures (answer shape mismatches) propagate.
    pub fn check_chapter(
        &mut self,
        chapter_index: usize,
        chapter: &Chapter,
    ) -> Result<ChapterCheckReport, GradeError> {
        let mut report = ChapterCheckReport::default();

        for (qi, question) in chapter.questions.iter().enumerate() {
            let id = QuestionId::new(chapter_index, qi);
            if self.get(id).is_some_and(|r| r.graded.is_graded()) {
                report.already_graded.push(id);
                continue;
            }
            match self.check_and_grade(id, question) {
                Ok(verdict) => report.graded.push((id, verdict)),
                Err(GradeError::IncompleteAnswer) => report.incomplete.push(id),
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    pub fn get(&self, id: QuestionId) -> Option<&AnswerRecord> {
        self.records.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &AnswerRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Number of questions with any recorded interaction.
    pub fn attempted(&self) -> usize {
        self.records.len()
    }

    /// Number of graded records.
    pub fn graded(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.graded.is_graded())
            .count()
    }

    /// Number of records graded correct.
    pub fn correct(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.graded.is_correct())
            .count()
    }

    /// True when every question in the chapter has a graded record. A
    /// chapter without questions never counts as completed.
    pub fn chapter_completed(&self, chapter_index: usize, chapter: &Chapter) -> bool {
        !chapter.questions.is_empty()
            && (0..chapter.questions.len()).all(|qi| {
                self.get(QuestionId::new(chapter_index, qi))
                    .is_some_and(|r| r.graded.is_graded())
            })
    }

    /// Number of fully graded chapters in the book.
    pub fn chapters_completed(&self, book: &Book) -> usize {
        book.chapters
            .iter()
            .enumerate()
            .filter(|(ci, chapter)| self.chapter_completed(*ci, chapter))
            .count()
    }

    /// Clear every record. Used only by the explicit reset flow.
    pub fn reset_all(&mut self) {
        self.records.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CorrectAnswer, QuestionKind};
    use crate::grading::SlotFill;
    use crate::loader::parse_book_str;

    fn two_by_two_book() -> Book {
        parse_book_str(
            r#"{
            "chapters": [
                {
                    "title": "One",
                    "content": { "passage": "p1" },
                    "questions": [
                        {
                            "type": "multiple-choice",
                            "question": "q1",
                            "options": ["a", "b"],
                            "correct": 0
                        },
                        {
                            "type": "fill-in-blank",
                            "question": "q2",
                            "correct": "Paris"
                        }
                    ]
                },
                {
                    "title": "Two",
                    "content": { "passage": "p2" },
                    "questions": [
                        {
                            "type": "reading-passage",
                            "question": "q3",
                            "options": ["x", "y"],
                            "correct": [1]
                        },
                        {
                            "type": "drag-drop",
                            "question": "q4",
                            "items": ["I", "am"],
                            "correct": ["I", "am"]
                        }
                    ]
                }
            ]
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn selection_creates_record_without_grading() {
        let mut store = AnswerStore::new();
        let id = QuestionId::new(0, 0);
        store.record_selection(id, RawAnswer::Choice(1)).unwrap();

        let record = store.get(id).unwrap();
        assert_eq!(record.answer, RawAnswer::Choice(1));
        assert_eq!(record.graded, Graded::Ungraded);
        assert_eq!(store.graded(), 0);
    }

    #[test]
    fn selection_overwrites_until_graded() {
        let book = two_by_two_book();
        let q = book.question(QuestionId::new(0, 0)).unwrap();
        let mut store = AnswerStore::new();
        let id = QuestionId::new(0, 0);

        store.record_selection(id, RawAnswer::Choice(1)).unwrap();
        store.record_selection(id, RawAnswer::Choice(0)).unwrap();
        assert_eq!(store.check_and_grade(id, q), Ok(Verdict::Correct));

        // Locked now.
        assert_eq!(
            store.record_selection(id, RawAnswer::Choice(1)),
            Err(GradeError::AlreadyGraded)
        );
        assert_eq!(store.get(id).unwrap().answer, RawAnswer::Choice(0));
    }

    #[test]
    fn check_without_record_is_incomplete() {
        let book = two_by_two_book();
        let q = book.question(QuestionId::new(0, 0)).unwrap();
        let mut store = AnswerStore::new();
        assert_eq!(
            store.check_and_grade(QuestionId::new(0, 0), q),
            Err(GradeError::IncompleteAnswer)
        );
    }

    #[test]
    fn at_most_once_grading() {
        let book = two_by_two_book();
        let q = book.question(QuestionId::new(0, 0)).unwrap();
        let mut store = AnswerStore::new();
        let id = QuestionId::new(0, 0);

        store.record_selection(id, RawAnswer::Choice(0)).unwrap();
        assert_eq!(store.check_and_grade(id, q), Ok(Verdict::Correct));
        let correct_before = store.correct();

        assert_eq!(
            store.check_and_grade(id, q),
            Err(GradeError::AlreadyGraded)
        );
        assert_eq!(store.correct(), correct_before);
    }

    #[test]
    fn incomplete_check_leaves_record_untouched() {
        let book = two_by_two_book();
        let id = QuestionId::new(1, 1);
        let q = book.question(id).unwrap();
        let mut store = AnswerStore::new();

        let mut fill = SlotFill::empty(2, &q.items);
        assert!(fill.place(0, "I"));
        store
            .record_selection(id, RawAnswer::Slots(fill.clone()))
            .unwrap();

        assert_eq!(
            store.check_and_grade(id, q),
            Err(GradeError::IncompleteAnswer)
        );
        let record = store.get(id).unwrap();
        assert_eq!(record.graded, Graded::Ungraded);
        assert_eq!(record.answer, RawAnswer::Slots(fill));
    }

    #[test]
    fn chapter_check_grades_what_it_can() {
        let book = two_by_two_book();
        let mut store = AnswerStore::new();

        // Answer only the first question of chapter 0.
        store
            .record_selection(QuestionId::new(0, 0), RawAnswer::Choice(0))
            .unwrap();

        let report = store.check_chapter(0, &book.chapters[0]).unwrap();
        assert_eq!(report.graded, vec![(QuestionId::new(0, 0), Verdict::Correct)]);
        assert_eq!(report.incomplete, vec![QuestionId::new(0, 1)]);
        assert!(!report.chapter_done());

        // Finish the chapter; the graded question is reported, not re-graded.
        store
            .record_selection(QuestionId::new(0, 1), RawAnswer::Text("paris".into()))
            .unwrap();
        let report = store.check_chapter(0, &book.chapters[0]).unwrap();
        assert_eq!(report.already_graded, vec![QuestionId::new(0, 0)]);
        assert_eq!(report.graded, vec![(QuestionId::new(0, 1), Verdict::Correct)]);
        assert!(report.chapter_done());
    }

    #[test]
    fn chapter_completion_requires_all_graded() {
        let book = two_by_two_book();
        let mut store = AnswerStore::new();

        store
            .record_selection(QuestionId::new(0, 0), RawAnswer::Choice(0))
            .unwrap();
        store
            .check_and_grade(QuestionId::new(0, 0), book.question(QuestionId::new(0, 0)).unwrap())
            .unwrap();
        assert!(!store.chapter_completed(0, &book.chapters[0]));
        assert_eq!(store.chapters_completed(&book), 0);

        store
            .record_selection(QuestionId::new(0, 1), RawAnswer::Text("Paris".into()))
            .unwrap();
        store
            .check_and_grade(QuestionId::new(0, 1), book.question(QuestionId::new(0, 1)).unwrap())
            .unwrap();
        assert!(store.chapter_completed(0, &book.chapters[0]));
        assert_eq!(store.chapters_completed(&book), 1);
    }

    #[test]
    fn empty_chapter_never_completes() {
        let chapter = Chapter {
            title: "Empty".into(),
            body: crate::content::ChapterBody {
                passage: "p".into(),
                explanation: None,
            },
            questions: vec![],
        };
        let store = AnswerStore::new();
        assert!(!store.chapter_completed(0, &chapter));
    }

    #[test]
    fn reset_clears_everything() {
        let book = two_by_two_book();
        let mut store = AnswerStore::new();
        store
            .record_selection(QuestionId::new(0, 0), RawAnswer::Choice(0))
            .unwrap();
        store
            .check_and_grade(QuestionId::new(0, 0), book.question(QuestionId::new(0, 0)).unwrap())
            .unwrap();

        store.reset_all();
        assert!(store.is_empty());
        for id in book.question_ids() {
            assert!(store.get(id).is_none());
        }
        assert_eq!(store.chapters_completed(&book), 0);
    }

    #[test]
    fn store_serde_uses_string_keys() {
        let mut store = AnswerStore::new();
        store
            .record_selection(QuestionId::new(0, 1), RawAnswer::Text("hi".into()))
            .unwrap();

        let json = serde_json::to_value(&store).unwrap();
        assert!(json.get("q_0_1").is_some());
        assert_eq!(json["q_0_1"]["graded"], "ungraded");

        let back: AnswerStore = serde_json::from_value(json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn correct_count_tracks_verdicts() {
        let q_wrong = Question {
            prompt: "q".into(),
            kind: QuestionKind::MultipleChoice,
            options: vec!["a".into(), "b".into()],
            items: vec![],
            correct: CorrectAnswer::Index(0),
            feedback: None,
        };
        let mut store = AnswerStore::new();
        store
            .record_selection(QuestionId::new(0, 0), RawAnswer::Choice(1))
            .unwrap();
        assert_eq!(
            store.check_and_grade(QuestionId::new(0, 0), &q_wrong),
            Ok(Verdict::Incorrect)
        );
        assert_eq!(store.graded(), 1);
        assert_eq!(store.correct(), 0);
    }
}
