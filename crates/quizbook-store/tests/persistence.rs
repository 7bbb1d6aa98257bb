//! Round-trip tests: a session saved through the file store restores to
//! exactly the state that was saved, and aggregation agrees before and
//! after the restore.

use quizbook_core::content::{Book, QuestionId};
use quizbook_core::grading::RawAnswer;
use quizbook_core::loader::parse_book_str;
use quizbook_core::persist::{Identity, ProgressState, ProgressStore};
use quizbook_core::progress::snapshot;
use quizbook_core::store::AnswerStore;
use quizbook_store::FileStore;

fn book() -> Book {
    parse_book_str(
        r#"{
        "chapters": [
            {
                "title": "One",
                "content": { "passage": "p" },
                "questions": [
                    { "type": "multiple-choice", "question": "a", "options": ["x", "y"], "correct": 0 },
                    { "type": "fill-in-blank", "question": "b", "correct": "Paris" }
                ]
            },
            {
                "title": "Two",
                "content": { "passage": "p" },
                "questions": [
                    { "type": "drag-drop", "question": "c", "items": ["I", "am"], "correct": ["I", "am"] }
                ]
            }
        ]
    }"#,
    )
    .unwrap()
}

/// One graded, one ungraded, one untouched question.
fn mixed_store(book: &Book) -> AnswerStore {
    let mut answers = AnswerStore::new();

    let graded_id = QuestionId::new(0, 0);
    answers
        .record_selection(graded_id, RawAnswer::Choice(0))
        .unwrap();
    answers
        .check_and_grade(graded_id, book.question(graded_id).unwrap())
        .unwrap();

    answers
        .record_selection(QuestionId::new(0, 1), RawAnswer::Text("par".into()))
        .unwrap();

    // q_1_0 untouched.
    answers
}

#[test]
fn save_then_load_restores_the_exact_state() {
    let book = book();
    let answers = mixed_store(&book);
    let identity = Identity {
        name: "Rana".into(),
        itqan_id: "IT-5".into(),
    };

    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("data"));

    let state = ProgressState::collect(&book, &answers, 1, Some(&identity));
    store.save_progress(&state).unwrap();
    store.save_identity(&identity).unwrap();

    let restored = store.load_progress().unwrap().unwrap();
    assert_eq!(restored, state);
    assert_eq!(store.load_identity().unwrap(), Some(identity.clone()));

    // The untouched question stays absent across the round trip.
    assert!(restored.user_answers.get(QuestionId::new(1, 0)).is_none());

    // Aggregation over the restored store matches the live one.
    let before = snapshot(&book, &answers, 1, Some(&identity));
    let after = snapshot(&book, &restored.user_answers, restored.current_chapter, Some(&identity));
    assert_eq!(before, after);
    assert_eq!(after.correct_answers, 1);
    assert_eq!(after.graded, 1);
    assert_eq!(after.attempted, 2);
}

#[test]
fn restored_store_keeps_answers_locked() {
    let book = book();
    let answers = mixed_store(&book);

    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    store
        .save_progress(&ProgressState::collect(&book, &answers, 0, None))
        .unwrap();

    let mut restored = store.load_progress().unwrap().unwrap().user_answers;
    let graded_id = QuestionId::new(0, 0);

    // Still locked after the round trip.
    assert!(restored
        .record_selection(graded_id, RawAnswer::Choice(1))
        .is_err());
    assert!(restored
        .check_and_grade(graded_id, book.question(graded_id).unwrap())
        .is_err());

    // The ungraded record is still workable.
    let ungraded_id = QuestionId::new(0, 1);
    restored
        .record_selection(ungraded_id, RawAnswer::Text("Paris".into()))
        .unwrap();
    restored
        .check_and_grade(ungraded_id, book.question(ungraded_id).unwrap())
        .unwrap();
    assert_eq!(restored.correct(), 2);
}
