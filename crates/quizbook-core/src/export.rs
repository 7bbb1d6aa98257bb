//! On-demand progress export.
//!
//! A point-in-time dump of identity, answers, and stats, written as pretty
//! JSON for the learner to hand in or keep. Not a resumable format; the
//! persisted progress record is the one that gets restored.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::Book;
use crate::persist::{ProgressState, Stats};
use crate::store::AnswerStore;

/// A complete export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Unique identifier for this export.
    pub id: Uuid,
    pub user_name: String,
    pub user_itqan_id: String,
    pub user_answers: AnswerStore,
    pub stats: Stats,
    pub current_chapter: usize,
    /// Chapter titles, for context when reading the dump.
    pub chapter_titles: Vec<String>,
    /// When the export was taken.
    pub timestamp: DateTime<Utc>,
}

impl ExportDocument {
    /// Build an export from the current persisted-state blob.
    pub fn collect(book: &Book, state: &ProgressState) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: state.user_name.clone(),
            user_itqan_id: state.user_itqan_id.clone(),
            user_answers: state.user_answers.clone(),
            stats: state.stats,
            current_chapter: state.current_chapter,
            chapter_titles: book.chapters.iter().map(|c| c.title.clone()).collect(),
            timestamp: Utc::now(),
        }
    }

    /// Write the export as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize export")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write export to {}", path.display()))?;
        Ok(())
    }

    /// Load an export from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read export from {}", path.display()))?;
        let export: ExportDocument =
            serde_json::from_str(&content).context("failed to parse export JSON")?;
        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::QuestionId;
    use crate::grading::RawAnswer;
    use crate::loader::parse_book_str;
    use crate::persist::Identity;
    use crate::store::AnswerStore;

    fn make_export() -> (Book, ExportDocument) {
        let book = parse_book_str(
            r#"{
            "chapters": [
                {
                    "title": "Greetings",
                    "content": { "passage": "p" },
                    "questions": [
                        { "type": "multiple-choice", "question": "a", "options": ["x", "y"], "correct": 0 }
                    ]
                },
                {
                    "title": "Reading",
                    "content": { "passage": "p" },
                    "questions": [
                        { "type": "fill-in-blank", "question": "b", "correct": "Paris" }
                    ]
                }
            ]
        }"#,
        )
        .unwrap();

        let mut answers = AnswerStore::new();
        answers
            .record_selection(QuestionId::new(0, 0), RawAnswer::Choice(0))
            .unwrap();
        answers
            .check_and_grade(QuestionId::new(0, 0), book.question(QuestionId::new(0, 0)).unwrap())
            .unwrap();

        let identity = Identity {
            name: "Huda".into(),
            itqan_id: "IT-11".into(),
        };
        let state = ProgressState::collect(&book, &answers, 1, Some(&identity));
        let export = ExportDocument::collect(&book, &state);
        (book, export)
    }

    #[test]
    fn export_carries_titles_and_identity() {
        let (_book, export) = make_export();
        assert_eq!(export.chapter_titles, vec!["Greetings", "Reading"]);
        assert_eq!(export.user_name, "Huda");
        assert_eq!(export.stats.correct_answers, 1);
        assert_eq!(export.current_chapter, 1);
    }

    #[test]
    fn export_json_roundtrip() {
        let (_book, export) = make_export();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        export.save_json(&path).unwrap();
        let loaded = ExportDocument::load_json(&path).unwrap();
        assert_eq!(loaded, export);
    }

    #[test]
    fn export_wire_format() {
        let (_book, export) = make_export();
        let json = serde_json::to_value(&export).unwrap();
        assert!(json.get("userItqanId").is_some());
        assert!(json.get("chapterTitles").is_some());
        assert!(json.get("timestamp").is_some());
        assert!(json["userAnswers"].get("q_0_0").is_some());
    }
}
