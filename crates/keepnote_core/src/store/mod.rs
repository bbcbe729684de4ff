//! Canonical note collection and its mutation entry points.
//!
//! # Responsibility
//! - Own the in-memory list every view is derived from.
//! - Mirror accepted mutations to persistent storage.

pub mod note_store;
