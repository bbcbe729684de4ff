//! Persistence adapter for the note collection.
//!
//! # Responsibility
//! - Define the load/save contract the note store persists through.
//! - Keep blob codec and backend details behind this seam.
//!
//! # Invariants
//! - `save` writes the full collection; there are no partial writes.
//! - `load` never propagates malformed persisted data to the caller.

use crate::db::DbError;
use crate::model::note::Note;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;
mod memory;
mod sqlite;

pub use memory::MemoryNoteStorage;
pub use sqlite::{SqliteNoteStorage, NOTES_KEY};

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport-level error for persistence operations.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize note collection: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Revived collection plus recovery facts from the decode step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedNotes {
    /// Surviving notes in stored (newest-first) order.
    pub notes: Vec<Note>,
    /// Records quarantined by validation during decode.
    pub dropped_records: usize,
    /// Whole blob was unreadable and treated as no prior state.
    pub malformed_blob: bool,
}

/// Storage interface the note store persists through.
///
/// Injected so the store is testable without a real backend.
pub trait NoteStorage {
    /// Reads the stored collection. An absent blob yields an empty one;
    /// damaged data is resolved here, never surfaced as notes.
    fn load(&mut self) -> StorageResult<LoadedNotes>;

    /// Serializes the full collection and overwrites the prior value.
    fn save(&mut self, notes: &[Note]) -> StorageResult<()>;
}
