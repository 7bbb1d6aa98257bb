//! File-backed storage.
//!
//! Progress and identity live in two independent JSON files inside a data
//! directory, so clearing progress leaves identity intact. Writes go
//! through a temp file and an atomic rename; readers never observe a
//! half-written record.

use std::path::{Path, PathBuf};

use quizbook_core::error::StorageError;
use quizbook_core::persist::{Identity, ProgressState, ProgressStore};
use serde::de::DeserializeOwned;
use serde::Serialize;

const PROGRESS_FILE: &str = "progress.json";
const IDENTITY_FILE: &str = "identity.json";

/// Durable storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_record<T: Serialize>(&self, name: &str, record: &T) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string_pretty(record)?;
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{name}.tmp"));
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        tracing::debug!(path = %path.display(), "record saved");
        Ok(())
    }

    fn read_record<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StorageError> {
        let path = self.dir.join(name);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e)),
        };
        let record = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    fn remove_record(&self, name: &str) -> Result<(), StorageError> {
        let path = self.dir.join(name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

impl ProgressStore for FileStore {
    fn save_progress(&self, state: &ProgressState) -> Result<(), StorageError> {
        self.write_record(PROGRESS_FILE, state)
    }

    fn load_progress(&self) -> Result<Option<ProgressState>, StorageError> {
        self.read_record(PROGRESS_FILE)
    }

    fn clear_progress(&self) -> Result<(), StorageError> {
        self.remove_record(PROGRESS_FILE)
    }

    fn save_identity(&self, identity: &Identity) -> Result<(), StorageError> {
        self.write_record(IDENTITY_FILE, identity)
    }

    fn load_identity(&self) -> Result<Option<Identity>, StorageError> {
        self.read_record(IDENTITY_FILE)
    }

    fn clear_identity(&self) -> Result<(), StorageError> {
        self.remove_record(IDENTITY_FILE)
    }
}
