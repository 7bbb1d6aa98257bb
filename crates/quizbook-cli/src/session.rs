//! Session plumbing shared by the interaction commands.
//!
//! Each CLI invocation is one user event: load the book and any saved
//! state, run a single core operation to completion, save, render. The
//! session owns the degrade-to-in-memory behavior: storage failures are
//! reported once and never abort the command.

use anyhow::Result;

use quizbook_core::content::{Book, Question, QuestionId};
use quizbook_core::loader::load_book;
use quizbook_core::persist::{Identity, ProgressState, ProgressStore};
use quizbook_core::progress::{snapshot, ProgressSnapshot};
use quizbook_core::store::AnswerStore;
use quizbook_store::FileStore;

use crate::config::QuizbookConfig;

pub struct Session {
    pub book: Book,
    pub answers: AnswerStore,
    pub current_chapter: usize,
    pub identity: Option<Identity>,
    store: FileStore,
}

impl Session {
    /// Load the book and any saved state. A content failure is fatal;
    /// storage failures degrade to a fresh in-memory session.
    pub fn load(config: &QuizbookConfig) -> Result<Self> {
        let book = load_book(&config.content)?;
        let store = FileStore::new(config.data_dir.clone());

        let identity = match store.load_identity() {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "could not read identity record");
                eprintln!("Warning: could not read saved identity ({e})");
                None
            }
        };

        let (answers, mut current_chapter) = match store.load_progress() {
            Ok(Some(state)) => (state.user_answers, state.current_chapter),
            Ok(None) => (AnswerStore::new(), 0),
            Err(e) => {
                tracing::warn!(error = %e, "could not read progress record");
                eprintln!("Warning: could not read saved progress, starting fresh ({e})");
                (AnswerStore::new(), 0)
            }
        };

        if current_chapter >= book.chapters.len() {
            tracing::warn!(current_chapter, "saved chapter index out of bounds");
            current_chapter = 0;
        }

        Ok(Self {
            book,
            answers,
            current_chapter,
            identity,
            store,
        })
    }

    /// The identity record, or an error telling the user how to set one.
    /// Question interaction is gated behind this.
    pub fn require_identity(&self) -> Result<&Identity> {
        self.identity.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "no identity set; run `quizbook identity --name <name> --id <itqan-id>` first"
            )
        })
    }

    /// Resolve a question id against the loaded book.
    pub fn question(&self, id: QuestionId) -> Result<&Question> {
        self.book
            .question(id)
            .ok_or_else(|| anyhow::anyhow!("no such question: {id}"))
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        snapshot(
            &self.book,
            &self.answers,
            self.current_chapter,
            self.identity.as_ref(),
        )
    }

    /// Persist the session. Failures are reported once and swallowed; the
    /// in-memory state this command computed is already final.
    pub fn save(&self) {
        let state = ProgressState::collect(
            &self.book,
            &self.answers,
            self.current_chapter,
            self.identity.as_ref(),
        );
        if let Err(e) = self.store.save_progress(&state) {
            tracing::warn!(error = %e, "progress save failed");
            eprintln!("Warning: could not save progress, this session is in-memory only ({e})");
        }
    }

    /// The persisted-state blob for the current session.
    pub fn progress_state(&self) -> ProgressState {
        ProgressState::collect(
            &self.book,
            &self.answers,
            self.current_chapter,
            self.identity.as_ref(),
        )
    }
}
