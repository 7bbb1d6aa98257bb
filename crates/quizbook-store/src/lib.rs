//! quizbook-store — Storage backends for progress and identity records.
//!
//! Implements the `ProgressStore` trait from `quizbook-core`: a durable
//! file-backed store for real sessions and an in-memory store for tests.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
