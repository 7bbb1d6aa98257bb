//! The `quizbook answer` command.

use anyhow::{Context, Result};

use quizbook_core::content::{QuestionId, QuestionKind};
use quizbook_core::error::GradeError;
use quizbook_core::grading::{RawAnswer, SlotFill};

use crate::config::QuizbookConfig;
use crate::session::Session;

pub fn execute(
    config: &QuizbookConfig,
    question: String,
    choice: Option<usize>,
    text: Option<String>,
    place: Option<String>,
    clear_slot: Option<usize>,
) -> Result<()> {
    let mut session = Session::load(config)?;
    session.require_identity()?;

    let id: QuestionId = question
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let q = session.question(id)?.clone();

    let answer = match q.kind {
        QuestionKind::MultipleChoice | QuestionKind::ReadingPassage => {
            let index = choice.context("choice question: pass --choice <index>")?;
            anyhow::ensure!(
                index < q.options.len(),
                "option index {index} is out of range ({} options)",
                q.options.len()
            );
            RawAnswer::Choice(index)
        }
        QuestionKind::FillInBlank => {
            let text = text.context("fill-in-blank question: pass --text <answer>")?;
            RawAnswer::Text(text)
        }
        QuestionKind::DragDrop => {
            // Start from the current fill so tokens accumulate across calls.
            let mut fill = match session.answers.get(id).map(|r| &r.answer) {
                Some(RawAnswer::Slots(fill)) => fill.clone(),
                _ => SlotFill::empty(q.slot_count(), &q.items),
            };

            if let Some(position) = clear_slot {
                anyhow::ensure!(fill.clear(position), "slot {position} is not filled");
            } else {
                let placement = place.context(
                    "drag-drop question: pass --place <position>=<token> or --clear-slot <position>",
                )?;
                let (position, token) = placement
                    .split_once('=')
                    .context("--place takes the form <position>=<token>")?;
                let position: usize = position
                    .trim()
                    .parse()
                    .context("--place position must be a number")?;
                let token = token.trim();
                anyhow::ensure!(
                    fill.place(position, token),
                    "cannot place {token:?} at slot {position}: \
                     position out of range or token not available"
                );
            }
            RawAnswer::Slots(fill)
        }
    };

    match session.answers.record_selection(id, answer) {
        Ok(()) => {}
        Err(GradeError::AlreadyGraded) => {
            anyhow::bail!("{id} is already graded; answers are locked after checking")
        }
        Err(e) => return Err(e.into()),
    }

    session.save();
    println!("Recorded answer for {id}. Check it with `quizbook check {id}`.");
    Ok(())
}
