//! Error types for content loading, grading, and storage.
//!
//! Defined here so callers can classify failures without string matching:
//! grading errors distinguish recoverable user-input problems from
//! presentation-layer defects.

use std::path::PathBuf;

use thiserror::Error;

use crate::content::{QuestionId, QuestionKind};

/// Errors raised while loading a content document. All of these are fatal
/// to startup: a book that fails to load is never partially rendered.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The content source could not be read at all.
    #[error("failed to read content from {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("malformed content document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The document parsed but contains no chapters.
    #[error("content document has no chapters")]
    MissingChapters,

    /// A question is missing required fields for its declared type, or
    /// declares an unknown type.
    #[error("invalid question {id}: {reason}")]
    BadQuestion { id: QuestionId, reason: String },
}

/// Errors raised when recording or grading an answer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradeError {
    /// The answer is absent, empty, or has unfilled positions. The caller
    /// should prompt the user to complete it; nothing is recorded.
    #[error("answer is missing or incomplete")]
    IncompleteAnswer,

    /// The question already carries a grading outcome. Answers lock once
    /// graded; the control driving this call should have been disabled.
    #[error("question is already graded")]
    AlreadyGraded,

    /// No question with this id exists in the loaded book.
    #[error("no such question: {0}")]
    UnknownQuestion(QuestionId),

    /// The answer's shape does not fit the question kind (e.g. a text
    /// answer submitted for a drag-drop question).
    #[error("answer shape does not match a {expected} question")]
    AnswerMismatch { expected: QuestionKind },
}

impl GradeError {
    /// Returns `true` for errors that indicate a bug in the calling layer
    /// rather than incomplete user input. These should be logged, not
    /// surfaced as user prompts.
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            GradeError::AlreadyGraded | GradeError::AnswerMismatch { .. }
        )
    }
}

/// Errors raised by storage backends. Always recoverable: a failed save
/// degrades the session to in-memory-only and never rolls back state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store cannot be used at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A stored record exists but cannot be decoded.
    #[error("stored record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// An I/O failure while reading or writing a record.
    #[error("storage i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
