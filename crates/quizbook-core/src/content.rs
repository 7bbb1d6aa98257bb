//! Core content model types for quizbook.
//!
//! A `Book` is the immutable representation of a loaded content document:
//! chapters of passage text plus the questions inside them. Everything here
//! is created once by the loader and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable identity of a question: chapter index plus question index within
/// the chapter. Rendered and persisted as `q_<chapter>_<question>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct QuestionId {
    pub chapter: usize,
    pub question: usize,
}

impl QuestionId {
    pub fn new(chapter: usize, question: usize) -> Self {
        Self { chapter, question }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q_{}_{}", self.chapter, self.question)
    }
}

impl FromStr for QuestionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("q_")
            .ok_or_else(|| format!("invalid question id: {s}"))?;
        let (chapter, question) = rest
            .split_once('_')
            .ok_or_else(|| format!("invalid question id: {s}"))?;
        let chapter = chapter
            .parse()
            .map_err(|_| format!("invalid chapter index in question id: {s}"))?;
        let question = question
            .parse()
            .map_err(|_| format!("invalid question index in question id: {s}"))?;
        Ok(Self { chapter, question })
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> String {
        id.to_string()
    }
}

impl TryFrom<String> for QuestionId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    FillInBlank,
    DragDrop,
    ReadingPassage,
}

impl QuestionKind {
    /// Choice kinds answer by selecting an option index.
    pub fn is_choice(self) -> bool {
        matches!(self, QuestionKind::MultipleChoice | QuestionKind::ReadingPassage)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple-choice"),
            QuestionKind::FillInBlank => write!(f, "fill-in-blank"),
            QuestionKind::DragDrop => write!(f, "drag-drop"),
            QuestionKind::ReadingPassage => write!(f, "reading-passage"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple-choice" => Ok(QuestionKind::MultipleChoice),
            "fill-in-blank" => Ok(QuestionKind::FillInBlank),
            "drag-drop" => Ok(QuestionKind::DragDrop),
            "reading-passage" => Ok(QuestionKind::ReadingPassage),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// The canonical answer carried by a question. Content may use the scalar
/// or the set form for choice and text questions; drag-drop questions
/// always carry the full ordered slot sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectAnswer {
    /// A single accepted option index.
    Index(usize),
    /// Any of several accepted option indices.
    IndexSet(Vec<usize>),
    /// A single accepted text answer.
    Text(String),
    /// Any of several accepted text answers.
    TextSet(Vec<String>),
    /// The required slot contents, in order.
    Sequence(Vec<String>),
}

/// A single question.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Display text shown to the learner. Opaque to grading.
    pub prompt: String,
    pub kind: QuestionKind,
    /// Selectable options (choice kinds only, empty otherwise).
    pub options: Vec<String>,
    /// Draggable tokens (drag-drop only, empty otherwise).
    pub items: Vec<String>,
    pub correct: CorrectAnswer,
    /// Optional display text shown after grading. Opaque to grading.
    pub feedback: Option<String>,
}

impl Question {
    /// Number of drop positions for a drag-drop question, zero otherwise.
    pub fn slot_count(&self) -> usize {
        match &self.correct {
            CorrectAnswer::Sequence(seq) => seq.len(),
            _ => 0,
        }
    }
}

/// Passage and optional explanation text for a chapter. Opaque to the
/// core; rendered as-is by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterBody {
    pub passage: String,
    pub explanation: Option<String>,
}

/// A chapter: title, body text, and an ordered list of questions.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub title: String,
    pub body: ChapterBody,
    pub questions: Vec<Question>,
}

/// A loaded content document.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Total number of questions across all chapters.
    pub fn total_questions(&self) -> usize {
        self.chapters.iter().map(|c| c.questions.len()).sum()
    }

    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    /// Look up a question by id.
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.chapters
            .get(id.chapter)
            .and_then(|c| c.questions.get(id.question))
    }

    /// Ids of every question in the book, in chapter order.
    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.chapters.iter().enumerate().flat_map(|(ci, chapter)| {
            (0..chapter.questions.len()).map(move |qi| QuestionId::new(ci, qi))
        })
    }
}
