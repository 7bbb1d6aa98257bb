//! JSON content document loader.
//!
//! Loads a book from a `content.json`-style document and validates it.
//! Loading is strict: a question missing required fields for its declared
//! type fails the whole load. `validate_book` is a separate, non-fatal
//! lint pass for issues that don't prevent play.

use std::path::Path;

use serde::Deserialize;

use crate::content::{Book, Chapter, ChapterBody, CorrectAnswer, Question, QuestionId, QuestionKind};
use crate::error::ContentError;

/// Intermediate structure for parsing content documents.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    chapters: Vec<RawChapter>,
}

#[derive(Debug, Deserialize)]
struct RawChapter {
    title: String,
    content: RawBody,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawBody {
    passage: String,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "type")]
    kind: Option<String>,
    question: Option<String>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    items: Vec<String>,
    correct: Option<RawCorrect>,
    #[serde(default)]
    feedback: Option<String>,
}

/// The `correct` field as it appears on the wire: a scalar or an array,
/// of indices or of strings. Resolved into a typed `CorrectAnswer` once
/// the question kind is known.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCorrect {
    Index(usize),
    Text(String),
    IndexSet(Vec<usize>),
    TextSet(Vec<String>),
}

/// Load a book from a JSON file.
pub fn load_book(path: &Path) -> Result<Book, ContentError> {
    let content = std::fs::read_to_string(path).map_err(|source| ContentError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_book_str(&content)
}

/// Parse a JSON string into a `Book` (useful for testing).
pub fn parse_book_str(content: &str) -> Result<Book, ContentError> {
    let raw: RawDocument = serde_json::from_str(content)?;

    if raw.chapters.is_empty() {
        return Err(ContentError::MissingChapters);
    }

    let chapters = raw
        .chapters
        .into_iter()
        .enumerate()
        .map(|(ci, chapter)| {
            let questions = chapter
                .questions
                .into_iter()
                .enumerate()
                .map(|(qi, q)| resolve_question(QuestionId::new(ci, qi), q))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Chapter {
                title: chapter.title,
                body: ChapterBody {
                    passage: chapter.content.passage,
                    explanation: chapter.content.explanation,
                },
                questions,
            })
        })
        .collect::<Result<Vec<_>, ContentError>>()?;

    Ok(Book { chapters })
}

fn resolve_question(id: QuestionId, raw: RawQuestion) -> Result<Question, ContentError> {
    let bad = |reason: &str| ContentError::BadQuestion {
        id,
        reason: reason.to_string(),
    };

    let kind: QuestionKind = raw
        .kind
        .ok_or_else(|| bad("missing type"))?
        .parse()
        .map_err(|e: String| ContentError::BadQuestion { id, reason: e })?;
    let prompt = raw.question.ok_or_else(|| bad("missing question text"))?;
    let correct = raw.correct.ok_or_else(|| bad("missing correct answer"))?;

    let correct = match kind {
        QuestionKind::MultipleChoice | QuestionKind::ReadingPassage => {
            if raw.options.is_empty() {
                return Err(bad("choice question has no options"));
            }
            match correct {
                RawCorrect::Index(i) => CorrectAnswer::Index(i),
                RawCorrect::IndexSet(set) => CorrectAnswer::IndexSet(set),
                _ => return Err(bad("choice question needs an index (or index list) as correct")),
            }
        }
        QuestionKind::FillInBlank => match correct {
            RawCorrect::Text(s) => CorrectAnswer::Text(s),
            RawCorrect::TextSet(set) => CorrectAnswer::TextSet(set),
            _ => return Err(bad("fill-in-blank question needs text (or a text list) as correct")),
        },
        QuestionKind::DragDrop => {
            if raw.items.is_empty() {
                return Err(bad("drag-drop question has no items"));
            }
            match correct {
                RawCorrect::TextSet(seq) if !seq.is_empty() => CorrectAnswer::Sequence(seq),
                _ => return Err(bad("drag-drop question needs an ordered item list as correct")),
            }
        }
    };

    Ok(Question {
        prompt,
        kind,
        options: raw.options,
        items: raw.items,
        correct,
        feedback: raw.feedback,
    })
}

/// A warning from book validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question this applies to (if applicable).
    pub id: Option<QuestionId>,
    /// Warning message.
    pub message: String,
}

/// Validate a loaded book for issues that don't prevent play but usually
/// indicate authoring mistakes.
pub fn validate_book(book: &Book) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (ci, chapter) in book.chapters.iter().enumerate() {
        if chapter.questions.is_empty() {
            warnings.push(ValidationWarning {
                id: None,
                message: format!("chapter {} ({:?}) has no questions", ci, chapter.title),
            });
        }

        for (qi, q) in chapter.questions.iter().enumerate() {
            let id = QuestionId::new(ci, qi);
            let warn = |warnings: &mut Vec<ValidationWarning>, message: String| {
                warnings.push(ValidationWarning {
                    id: Some(id),
                    message,
                });
            };

            if q.prompt.trim().is_empty() {
                warn(&mut warnings, "question text is empty".into());
            }

            match &q.correct {
                CorrectAnswer::Index(i) => {
                    if *i >= q.options.len() {
                        warn(
                            &mut warnings,
                            format!("correct index {} is out of range ({} options)", i, q.options.len()),
                        );
                    }
                }
                CorrectAnswer::IndexSet(set) => {
                    for i in set {
                        if *i >= q.options.len() {
                            warn(
                                &mut warnings,
                                format!("correct index {} is out of range ({} options)", i, q.options.len()),
                            );
                        }
                    }
                }
                CorrectAnswer::Sequence(seq) => {
                    if seq.len() != q.items.len() {
                        warn(
                            &mut warnings,
                            format!(
                                "drop sequence has {} positions but {} items are provided",
                                seq.len(),
                                q.items.len()
                            ),
                        );
                    }
                    for token in seq {
                        if !q.items.contains(token) {
                            warn(
                                &mut warnings,
                                format!("drop sequence token {token:?} is not among the items"),
                            );
                        }
                    }
                    let mut seen = std::collections::HashSet::new();
                    for item in &q.items {
                        if !seen.insert(item) {
                            warn(&mut warnings, format!("duplicate drag item {item:?}"));
                        }
                    }
                }
                CorrectAnswer::Text(_) | CorrectAnswer::TextSet(_) => {}
            }
        }
    }

    warnings
}
