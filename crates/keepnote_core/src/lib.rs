//! Core domain logic for KeepNote.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Category, Note, NoteId, NotePatch, NoteValidationError};
pub use storage::{
    LoadedNotes, MemoryNoteStorage, NoteStorage, SqliteNoteStorage, StorageError, StorageResult,
    NOTES_KEY,
};
pub use store::note_store::NoteStore;
pub use view::filter::{category_counts, filter_notes, CategoryCounts, CategoryFilter, ViewQuery};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
