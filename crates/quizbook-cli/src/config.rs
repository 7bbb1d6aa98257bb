//! quizbook configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizbook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizbookConfig {
    /// Content document to play.
    #[serde(default = "default_content")]
    pub content: PathBuf,
    /// Directory holding the progress and identity records.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Require every question to be checked before `finish` shows the
    /// final score.
    #[serde(default)]
    pub require_all_checked: bool,
}

fn default_content() -> PathBuf {
    PathBuf::from("content.json")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".quizbook")
}

impl Default for QuizbookConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            data_dir: default_data_dir(),
            require_all_checked: false,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizbook.toml` in the current directory
/// 2. `~/.config/quizbook/config.toml`
///
/// Environment variable overrides: `QUIZBOOK_CONTENT`, `QUIZBOOK_DATA_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizbookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizbook.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizbookConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizbookConfig::default(),
    };

    // Apply env var overrides
    if let Ok(content) = std::env::var("QUIZBOOK_CONTENT") {
        config.content = PathBuf::from(content);
    }
    if let Ok(data_dir) = std::env::var("QUIZBOOK_DATA_DIR") {
        config.data_dir = PathBuf::from(data_dir);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizbook"))
}
