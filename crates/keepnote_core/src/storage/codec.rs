//! Blob codec for the persisted note collection.
//!
//! # Responsibility
//! - Serialize the collection into the stored JSON array form.
//! - Revive stored blobs through explicit validation instead of
//!   trusting their shape.
//!
//! # Invariants
//! - Quarantined records never reach the canonical list.
//! - An unreadable blob is equivalent to no prior state.

use crate::model::note::Note;
use crate::storage::LoadedNotes;
use log::warn;
use serde_json::Value;
use std::collections::HashSet;

/// Serializes the full collection into the stored JSON array form.
pub fn encode_notes(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string(notes)
}

/// Revives a stored blob, quarantining anything that fails validation.
///
/// A blob that is not a JSON array counts as malformed and yields an
/// empty collection. Individual records are dropped when they fail
/// typed decoding, violate a model invariant, or repeat an id that was
/// already revived. Survivors keep their stored order.
pub fn decode_notes(blob: &str) -> LoadedNotes {
    let values: Vec<Value> = match serde_json::from_str(blob) {
        Ok(values) => values,
        Err(err) => {
            warn!("event=notes_decode module=storage status=error error_code=malformed_blob error={err}");
            return LoadedNotes {
                notes: Vec::new(),
                dropped_records: 0,
                malformed_blob: true,
            };
        }
    };

    let mut notes: Vec<Note> = Vec::with_capacity(values.len());
    let mut seen_ids = HashSet::new();
    let mut dropped_records = 0usize;

    for value in values {
        let note: Note = match serde_json::from_value(value) {
            Ok(note) => note,
            Err(err) => {
                dropped_records += 1;
                warn!("event=notes_decode module=storage status=error error_code=record_shape error={err}");
                continue;
            }
        };

        if let Err(err) = note.validate() {
            dropped_records += 1;
            warn!(
                "event=notes_decode module=storage status=error error_code=record_invariant id={} error={err}",
                note.id
            );
            continue;
        }

        if !seen_ids.insert(note.id) {
            dropped_records += 1;
            warn!(
                "event=notes_decode module=storage status=error error_code=duplicate_id id={}",
                note.id
            );
            continue;
        }

        notes.push(note);
    }

    LoadedNotes {
        notes,
        dropped_records,
        malformed_blob: false,
    }
}
