//! Persisted state types and the storage trait.
//!
//! Two independent records: the progress blob (answers, stats, navigation
//! position) and the identity record. Keeping them separate lets identity
//! survive a progress reset. Storage backends implement `ProgressStore`;
//! the file-backed implementation lives in the `quizbook-store` crate.
//!
//! Field names are camelCase on the wire, matching the records written by
//! earlier releases.

use serde::{Deserialize, Serialize};

use crate::content::Book;
use crate::error::StorageError;
use crate::progress::ProgressSnapshot;
use crate::store::AnswerStore;

/// Who is playing. Persisted independently of progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: String,
    pub itqan_id: String,
}

/// Headline counters embedded in the progress record and exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_questions: usize,
    pub correct_answers: usize,
    pub chapters_completed: usize,
}

impl From<&ProgressSnapshot> for Stats {
    fn from(snapshot: &ProgressSnapshot) -> Self {
        Self {
            total_questions: snapshot.total_questions,
            correct_answers: snapshot.correct_answers,
            chapters_completed: snapshot.chapters_completed,
        }
    }
}

/// The atomic persisted progress blob. Saved and restored as one record;
/// a partial write never leaves a half-updated store behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub user_answers: AnswerStore,
    pub stats: Stats,
    pub current_chapter: usize,
    pub user_name: String,
    pub user_itqan_id: String,
}

impl ProgressState {
    /// Assemble the persisted blob from live session state.
    pub fn collect(
        book: &Book,
        answers: &AnswerStore,
        current_chapter: usize,
        identity: Option<&Identity>,
    ) -> Self {
        let snapshot = crate::progress::snapshot(book, answers, current_chapter, identity);
        Self {
            user_answers: answers.clone(),
            stats: Stats::from(&snapshot),
            current_chapter,
            user_name: snapshot.user_name,
            user_itqan_id: snapshot.user_itqan_id,
        }
    }
}

/// Durable storage for progress and identity.
///
/// Implementations report failures as values; they never panic and never
/// roll back in-memory state. A failed save leaves the session running
/// in-memory-only, and retries happen only on the next explicit call.
pub trait ProgressStore {
    fn save_progress(&self, state: &ProgressState) -> Result<(), StorageError>;
    fn load_progress(&self) -> Result<Option<ProgressState>, StorageError>;
    fn clear_progress(&self) -> Result<(), StorageError>;

    fn save_identity(&self, identity: &Identity) -> Result<(), StorageError>;
    fn load_identity(&self) -> Result<Option<Identity>, StorageError>;
    fn clear_identity(&self) -> Result<(), StorageError>;
}
