//! The `quizbook reset` command.

use anyhow::{Context, Result};

use quizbook_core::persist::ProgressStore;
use quizbook_store::FileStore;

use crate::config::QuizbookConfig;

pub fn execute(config: &QuizbookConfig, yes: bool, clear_identity: bool) -> Result<()> {
    anyhow::ensure!(
        yes,
        "this erases all recorded answers and cannot be undone; re-run with --yes to confirm"
    );

    // Operates on the stored records directly; no content needed.
    let store = FileStore::new(config.data_dir.clone());

    store
        .clear_progress()
        .context("failed to clear saved progress")?;

    if clear_identity {
        store
            .clear_identity()
            .context("failed to clear identity")?;
        println!("Progress and identity reset.");
    } else {
        println!("Progress reset. Identity kept.");
    }

    Ok(())
}
