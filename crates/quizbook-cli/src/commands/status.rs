//! The `quizbook status` command.

use anyhow::Result;
use comfy_table::Table;

use crate::config::QuizbookConfig;
use crate::session::Session;

pub fn execute(config: &QuizbookConfig) -> Result<()> {
    let session = Session::load(config)?;
    let snap = session.snapshot();

    if let Some(identity) = &session.identity {
        println!("{} ({})\n", identity.name, identity.itqan_id);
    }

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Score".to_string(),
        format!("{}/{}", snap.correct_answers, snap.total_questions),
    ]);
    table.add_row(vec!["Accuracy".to_string(), format!("{}%", snap.accuracy)]);
    table.add_row(vec![
        "Progress".to_string(),
        format!("{}% ({} attempted)", snap.progress_percent, snap.attempted),
    ]);
    table.add_row(vec![
        "Chapters completed".to_string(),
        format!(
            "{}/{}",
            snap.chapters_completed,
            session.book.chapters.len()
        ),
    ]);
    table.add_row(vec![
        "Current chapter".to_string(),
        format!(
            "{}. {}",
            snap.current_chapter + 1,
            session.book.chapters[snap.current_chapter].title
        ),
    ]);

    println!("{table}");
    Ok(())
}
