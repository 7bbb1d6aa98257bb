//! The `quizbook export` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbook_core::export::ExportDocument;

use crate::config::QuizbookConfig;
use crate::session::Session;

pub fn execute(config: &QuizbookConfig, output: PathBuf) -> Result<()> {
    let session = Session::load(config)?;

    let export = ExportDocument::collect(&session.book, &session.progress_state());
    export.save_json(&output)?;

    println!(
        "Exported progress for {} to {}",
        if export.user_name.is_empty() {
            "anonymous"
        } else {
            export.user_name.as_str()
        },
        output.display()
    );
    Ok(())
}
