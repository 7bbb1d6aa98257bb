//! The `quizbook goto` command.

use anyhow::Result;

use crate::config::QuizbookConfig;
use crate::session::Session;

pub fn execute(config: &QuizbookConfig, chapter: usize) -> Result<()> {
    let mut session = Session::load(config)?;

    let count = session.book.chapters.len();
    anyhow::ensure!(
        chapter < count,
        "chapter {chapter} is out of range (book has {count} chapters)"
    );

    session.current_chapter = chapter;
    session.save();

    let title = &session.book.chapters[chapter].title;
    println!("Now at chapter {}: {title}", chapter + 1);
    Ok(())
}
