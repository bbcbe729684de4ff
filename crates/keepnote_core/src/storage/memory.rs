//! In-memory note storage.
//!
//! Round-trips through the same blob codec as the SQLite backend, so
//! store tests exercise serialization without touching a database.

use crate::model::note::Note;
use crate::storage::codec::{decode_notes, encode_notes};
use crate::storage::{LoadedNotes, NoteStorage, StorageError, StorageResult};
use std::cell::RefCell;
use std::rc::Rc;

/// Clonable storage over a shared in-memory blob slot.
///
/// Clones share the slot, so a caller can keep a probe handle on the
/// stored blob while a store owns its own copy.
#[derive(Clone, Default)]
pub struct MemoryNoteStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryNoteStorage {
    /// Creates empty storage, as if no prior session ever saved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-seeded with a raw blob, as if a prior
    /// session had written it.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(blob.into()))),
        }
    }

    /// Returns a copy of the raw stored blob, if any save happened.
    pub fn raw_blob(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl NoteStorage for MemoryNoteStorage {
    fn load(&mut self) -> StorageResult<LoadedNotes> {
        Ok(match self.slot.borrow().as_deref() {
            Some(blob) => decode_notes(blob),
            None => LoadedNotes::default(),
        })
    }

    fn save(&mut self, notes: &[Note]) -> StorageResult<()> {
        let blob = encode_notes(notes).map_err(StorageError::Serialize)?;
        *self.slot.borrow_mut() = Some(blob);
        Ok(())
    }
}
