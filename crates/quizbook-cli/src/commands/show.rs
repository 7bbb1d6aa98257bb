//! The `quizbook show` command.

use anyhow::Result;
use rand::seq::SliceRandom;

use quizbook_core::content::{QuestionId, QuestionKind};
use quizbook_core::grading::RawAnswer;
use quizbook_core::store::Graded;

use crate::config::QuizbookConfig;
use crate::session::Session;

pub fn execute(config: &QuizbookConfig, chapter: Option<usize>) -> Result<()> {
    let session = Session::load(config)?;
    let index = chapter.unwrap_or(session.current_chapter);
    let chapter = session
        .book
        .chapter(index)
        .ok_or_else(|| anyhow::anyhow!("no chapter {index} (book has {})", session.book.chapters.len()))?;

    println!("=== {}. {} ===\n", index + 1, chapter.title);
    println!("{}\n", chapter.body.passage);
    if let Some(explanation) = &chapter.body.explanation {
        println!("Explanation: {explanation}\n");
    }

    for (qi, question) in chapter.questions.iter().enumerate() {
        let id = QuestionId::new(index, qi);
        let record = session.answers.get(id);

        println!("[{id}] {}", question.prompt);
        match question.kind {
            QuestionKind::MultipleChoice | QuestionKind::ReadingPassage => {
                let selected = match record.map(|r| &r.answer) {
                    Some(RawAnswer::Choice(i)) => Some(*i),
                    _ => None,
                };
                for (i, option) in question.options.iter().enumerate() {
                    let marker = if selected == Some(i) { ">" } else { " " };
                    println!("  {marker} {i}. {option}");
                }
            }
            QuestionKind::FillInBlank => {
                if let Some(RawAnswer::Text(text)) = record.map(|r| &r.answer) {
                    println!("  your answer: {text}");
                } else {
                    println!("  (type your answer with `quizbook answer {id} --text ...`)");
                }
            }
            QuestionKind::DragDrop => {
                if let Some(RawAnswer::Slots(fill)) = record.map(|r| &r.answer) {
                    for (i, slot) in fill.slots.iter().enumerate() {
                        println!("  slot {i}: {}", slot.as_deref().unwrap_or("(drop here)"));
                    }
                    if !fill.remaining.is_empty() {
                        println!("  unplaced: {}", fill.remaining.join(", "));
                    }
                } else {
                    for i in 0..question.slot_count() {
                        println!("  slot {i}: (drop here)");
                    }
                    // Unplaced tokens come out in a fresh order each time,
                    // so the listing never gives away the answer.
                    let mut tokens = question.items.clone();
                    tokens.shuffle(&mut rand::thread_rng());
                    println!("  tokens: {}", tokens.join(", "));
                }
            }
        }

        if let Some(record) = record {
            match record.graded {
                Graded::Ungraded => println!("  [not checked yet]"),
                Graded::Correct => println!("  [correct]"),
                Graded::Incorrect => println!("  [incorrect]"),
            }
        }
        println!();
    }

    Ok(())
}
