//! The `quizbook check` command.

use anyhow::Result;

use quizbook_core::content::QuestionId;
use quizbook_core::error::GradeError;
use quizbook_core::grading::Verdict;

use crate::config::QuizbookConfig;
use crate::session::Session;

pub fn execute(config: &QuizbookConfig, question: Option<String>) -> Result<()> {
    let mut session = Session::load(config)?;
    session.require_identity()?;

    match question {
        Some(question) => {
            let id: QuestionId = question
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            check_one(&mut session, id)?;
        }
        None => check_current_chapter(&mut session)?,
    }

    let snap = session.snapshot();
    println!(
        "Score: {}/{} (accuracy {}%, {} chapter(s) completed)",
        snap.correct_answers, snap.total_questions, snap.accuracy, snap.chapters_completed
    );

    session.save();
    Ok(())
}

fn check_one(session: &mut Session, id: QuestionId) -> Result<()> {
    let question = session.question(id)?.clone();

    match session.answers.check_and_grade(id, &question) {
        Ok(verdict) => {
            print_verdict(id, verdict);
            if verdict.is_correct() {
                if let Some(feedback) = &question.feedback {
                    println!("  {feedback}");
                }
            }
        }
        Err(GradeError::IncompleteAnswer) => {
            println!("{id}: please complete your answer before checking.");
        }
        Err(GradeError::AlreadyGraded) => {
            tracing::warn!(%id, "check invoked on a graded question");
            println!("{id} is already graded; its outcome is locked.");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn check_current_chapter(session: &mut Session) -> Result<()> {
    let index = session.current_chapter;
    let chapter = session
        .book
        .chapter(index)
        .ok_or_else(|| anyhow::anyhow!("no chapter {index}"))?
        .clone();

    let report = session.answers.check_chapter(index, &chapter)?;

    for (id, verdict) in &report.graded {
        print_verdict(*id, *verdict);
    }
    for id in &report.already_graded {
        println!("{id}: already graded.");
    }
    for id in &report.incomplete {
        println!("{id}: please complete your answer.");
    }

    if report.chapter_done() {
        println!("\nChapter answers checked!");
    } else {
        println!("\nAnswer the remaining questions, then check again.");
    }
    Ok(())
}

fn print_verdict(id: QuestionId, verdict: Verdict) {
    match verdict {
        Verdict::Correct => println!("{id}: correct!"),
        Verdict::Incorrect => println!("{id}: incorrect."),
    }
}
