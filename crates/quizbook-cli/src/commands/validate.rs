//! The `quizbook validate` command.

use anyhow::Result;

use quizbook_core::loader::{load_book, validate_book};

use crate::config::QuizbookConfig;

pub fn execute(config: &QuizbookConfig) -> Result<()> {
    let book = load_book(&config.content)?;

    println!(
        "Book: {} chapters, {} questions",
        book.chapters.len(),
        book.total_questions()
    );

    let warnings = validate_book(&book);
    for w in &warnings {
        let prefix = w
            .id
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Content is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
