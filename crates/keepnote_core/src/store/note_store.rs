//! Note store holding the canonical collection.
//!
//! # Responsibility
//! - Apply create/update/delete/toggle mutations to the canonical list.
//! - Write the full collection through storage after every accepted
//!   mutation.
//!
//! # Invariants
//! - The canonical list is newest-first; creation prepends.
//! - Operations that change nothing persist nothing.
//! - A failed save never rolls back in-memory state; the in-memory
//!   collection stays authoritative for the session.

use crate::model::note::{Category, Note, NoteId, NotePatch, NoteValidationError};
use crate::storage::NoteStorage;
use log::{info, warn};

/// Single-owner store for the note collection.
///
/// Generic over its storage so callers can run it against SQLite or an
/// in-memory backend. All access goes through one instance; there is no
/// interior locking.
pub struct NoteStore<S: NoteStorage> {
    storage: S,
    notes: Vec<Note>,
    storage_warning: Option<String>,
}

impl<S: NoteStorage> NoteStore<S> {
    /// Opens the store, reviving prior state through the storage
    /// adapter.
    ///
    /// A storage read failure starts the session with an empty
    /// collection instead of failing; the condition is logged and kept
    /// on the warning surface.
    pub fn open(mut storage: S) -> Self {
        let (notes, storage_warning) = match storage.load() {
            Ok(loaded) => {
                if loaded.malformed_blob {
                    warn!("event=notes_load module=store status=recovered reason=malformed_blob");
                } else if loaded.dropped_records > 0 {
                    warn!(
                        "event=notes_load module=store status=ok count={} dropped={}",
                        loaded.notes.len(),
                        loaded.dropped_records
                    );
                } else {
                    info!(
                        "event=notes_load module=store status=ok count={}",
                        loaded.notes.len()
                    );
                }
                (loaded.notes, None)
            }
            Err(err) => {
                warn!("event=notes_load module=store status=error error={err}");
                (
                    Vec::new(),
                    Some(format!("stored notes could not be read: {err}")),
                )
            }
        };

        Self {
            storage,
            notes,
            storage_warning,
        }
    }

    /// Creates a note and prepends it to the canonical list.
    ///
    /// Title and content are trimmed; a blank title is rejected and the
    /// collection is left untouched.
    pub fn create(
        &mut self,
        title: &str,
        content: &str,
        category: Category,
    ) -> Result<Note, NoteValidationError> {
        let note = Note::new(title, content, category)?;
        info!(
            "event=note_create module=store status=ok id={} category={}",
            note.id,
            note.category.as_str()
        );
        self.notes.insert(0, note.clone());
        self.persist();
        Ok(note)
    }

    /// Merges a patch into the matching note and refreshes its
    /// `updated_at`.
    ///
    /// Returns `Ok(None)` when no note has the id; the collection is
    /// left untouched and nothing is persisted. A patch with a blank
    /// title is rejected before any lookup.
    pub fn update(
        &mut self,
        id: NoteId,
        patch: &NotePatch,
    ) -> Result<Option<Note>, NoteValidationError> {
        patch.validate()?;

        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            info!("event=note_update module=store status=noop id={id}");
            return Ok(None);
        };
        note.apply(patch);
        let updated = note.clone();
        info!("event=note_update module=store status=ok id={id}");
        self.persist();
        Ok(Some(updated))
    }

    /// Flips completion on the matching note.
    ///
    /// Missing ids are a silent no-op returning `None`.
    pub fn toggle_complete(&mut self, id: NoteId) -> Option<Note> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            info!("event=note_toggle module=store status=noop id={id}");
            return None;
        };
        note.completed = !note.completed;
        note.touch();
        let toggled = note.clone();
        info!(
            "event=note_toggle module=store status=ok id={id} completed={}",
            toggled.completed
        );
        self.persist();
        Some(toggled)
    }

    /// Removes the matching note from the canonical list.
    ///
    /// Missing ids are a silent no-op returning `None`.
    pub fn delete(&mut self, id: NoteId) -> Option<Note> {
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            info!("event=note_delete module=store status=noop id={id}");
            return None;
        };
        let removed = self.notes.remove(index);
        info!("event=note_delete module=store status=ok id={id}");
        self.persist();
        Some(removed)
    }

    /// Read-only view of the canonical list, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Latest persistence problem, if any.
    ///
    /// Set when a load or save fails, cleared by the next successful
    /// save. Callers surface it without interrupting the session.
    pub fn storage_warning(&self) -> Option<&str> {
        self.storage_warning.as_deref()
    }

    /// Writes the full collection through storage.
    ///
    /// Failure is non-fatal: the error is logged and recorded on the
    /// warning surface while in-memory state stays authoritative.
    fn persist(&mut self) {
        match self.storage.save(&self.notes) {
            Ok(()) => {
                self.storage_warning = None;
            }
            Err(err) => {
                warn!(
                    "event=notes_save module=store status=error count={} error={err}",
                    self.notes.len()
                );
                self.storage_warning = Some(format!("changes were not saved: {err}"));
            }
        }
    }
}
