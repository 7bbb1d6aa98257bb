//! The `quizbook finish` command.

use anyhow::Result;

use crate::config::QuizbookConfig;
use crate::session::Session;

pub fn execute(config: &QuizbookConfig) -> Result<()> {
    let session = Session::load(config)?;
    let identity = session.require_identity()?;
    let snap = session.snapshot();

    if config.require_all_checked && snap.graded < snap.total_questions {
        println!(
            "Please answer and check all questions before finishing ({} of {} checked).",
            snap.graded, snap.total_questions
        );
        return Ok(());
    }

    println!("=== Final score ===");
    println!("{} ({})", identity.name, identity.itqan_id);
    println!(
        "{} out of {} correct (accuracy {}%)",
        snap.correct_answers, snap.total_questions, snap.accuracy
    );
    println!(
        "{} of {} chapters completed",
        snap.chapters_completed,
        session.book.chapters.len()
    );
    Ok(())
}
