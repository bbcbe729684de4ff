//! Canonical domain model for the note collection.
//!
//! # Responsibility
//! - Define the data structures shared by store, filter and storage code.
//! - Keep validation of field invariants next to the data they protect.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is hard removal from the canonical list, never a tombstone.

pub mod note;
