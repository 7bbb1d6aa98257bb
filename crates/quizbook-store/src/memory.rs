//! In-memory storage for tests.

use std::sync::Mutex;

use quizbook_core::error::StorageError;
use quizbook_core::persist::{Identity, ProgressState, ProgressStore};

/// A `ProgressStore` that keeps records in memory.
///
/// Intended for tests: it can be switched into an unavailable state to
/// exercise the degrade-to-in-memory paths of callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    progress: Mutex<Option<ProgressState>>,
    identity: Mutex<Option<Identity>>,
    unavailable: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with `StorageError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    fn guard(&self) -> Result<(), StorageError> {
        if *self.unavailable.lock().unwrap() {
            Err(StorageError::Unavailable("memory store disabled".into()))
        } else {
            Ok(())
        }
    }
}

impl ProgressStore for MemoryStore {
    fn save_progress(&self, state: &ProgressState) -> Result<(), StorageError> {
        self.guard()?;
        *self.progress.lock().unwrap() = Some(state.clone());
        Ok(())
    }

    fn load_progress(&self) -> Result<Option<ProgressState>, StorageError> {
        self.guard()?;
        Ok(self.progress.lock().unwrap().clone())
    }

    fn clear_progress(&self) -> Result<(), StorageError> {
        self.guard()?;
        *self.progress.lock().unwrap() = None;
        Ok(())
    }

    fn save_identity(&self, identity: &Identity) -> Result<(), StorageError> {
        self.guard()?;
        *self.identity.lock().unwrap() = Some(identity.clone());
        Ok(())
    }

    fn load_identity(&self) -> Result<Option<Identity>, StorageError> {
        self.guard()?;
        Ok(self.identity.lock().unwrap().clone())
    }

    fn clear_identity(&self) -> Result<(), StorageError> {
        self.guard()?;
        *self.identity.lock().unwrap() = None;
        Ok(())
    }
}
