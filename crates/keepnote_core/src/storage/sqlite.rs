//! SQLite-backed note storage.
//!
//! # Responsibility
//! - Persist the collection blob under its fixed key in `kv_store`.
//! - Keep SQL text inside the persistence boundary.
//!
//! # Invariants
//! - Every save overwrites the stored value in a single statement.
//! - Reads never observe a partially written value.

use crate::model::note::Note;
use crate::storage::codec::{decode_notes, encode_notes};
use crate::storage::{LoadedNotes, NoteStorage, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Fixed key the collection blob is stored under.
pub const NOTES_KEY: &str = "notes";

/// Note storage over an open, migrated SQLite connection.
pub struct SqliteNoteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteStorage for SqliteNoteStorage<'_> {
    fn load(&mut self) -> StorageResult<LoadedNotes> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [NOTES_KEY],
                |row| row.get(0),
            )
            .optional()?;

        Ok(match blob {
            Some(blob) => decode_notes(&blob),
            None => LoadedNotes::default(),
        })
    }

    fn save(&mut self, notes: &[Note]) -> StorageResult<()> {
        let blob = encode_notes(notes).map_err(StorageError::Serialize)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2);",
            params![NOTES_KEY, blob],
        )?;
        Ok(())
    }
}
