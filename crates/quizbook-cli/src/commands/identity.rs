//! The `quizbook identity` command.

use anyhow::{Context, Result};

use quizbook_core::persist::{Identity, ProgressStore};
use quizbook_store::FileStore;

use crate::config::QuizbookConfig;

pub fn execute(
    config: &QuizbookConfig,
    name: Option<String>,
    id: Option<String>,
    clear: bool,
) -> Result<()> {
    let store = FileStore::new(config.data_dir.clone());

    if clear {
        store
            .clear_identity()
            .context("failed to clear identity")?;
        println!("Identity cleared.");
        return Ok(());
    }

    match (name, id) {
        (Some(name), Some(id)) => {
            let name = name.trim().to_string();
            let id = id.trim().to_string();
            anyhow::ensure!(!name.is_empty(), "name must not be empty");
            anyhow::ensure!(!id.is_empty(), "id must not be empty");

            let identity = Identity {
                name,
                itqan_id: id,
            };
            store
                .save_identity(&identity)
                .context("failed to save identity")?;
            println!("Welcome, {} ({}).", identity.name, identity.itqan_id);
            Ok(())
        }
        (None, None) => match store.load_identity().context("failed to read identity")? {
            Some(identity) => {
                println!("{} ({})", identity.name, identity.itqan_id);
                Ok(())
            }
            None => {
                println!("No identity set.");
                Ok(())
            }
        },
        _ => anyhow::bail!("provide both --name and --id"),
    }
}
