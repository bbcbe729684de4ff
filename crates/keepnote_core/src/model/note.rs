//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its closed category set.
//! - Provide creation/patch helpers that keep field invariants intact.
//!
//! # Invariants
//! - `id` is stable, non-nil and never reused for another note.
//! - `title` is non-empty after trimming for every accepted note.
//! - `updated_at` is never earlier than `created_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Closed category set classifying a note.
///
/// The wire form is the lowercase name; no other value is ever stored or
/// read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Private, everyday notes.
    Personal,
    /// Job-related notes.
    Work,
    /// Anything that needs attention now.
    Urgent,
}

impl Category {
    /// All category values, in display order.
    pub const ALL: [Category; 3] = [Category::Personal, Category::Work, Category::Urgent];

    /// Parses the lowercase wire/CLI token into a category.
    pub fn parse(value: &str) -> Option<Category> {
        match value {
            "personal" => Some(Category::Personal),
            "work" => Some(Category::Work),
            "urgent" => Some(Category::Urgent),
            _ => None,
        }
    }

    /// Returns the stable lowercase token used in storage and filters.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Urgent => "urgent",
        }
    }

    /// Returns the capitalized label used for display.
    pub fn label(self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Urgent => "Urgent",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation error for note construction and revived records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// The note id is the nil UUID.
    NilId,
    /// The title is empty or whitespace-only.
    EmptyTitle,
    /// `updated_at` is earlier than `created_at`.
    TimestampOrder,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be nil"),
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::TimestampOrder => write!(f, "note updated_at must not precede created_at"),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical note record.
///
/// Serialized field names follow the persisted layout: camelCase keys with
/// RFC 3339 text timestamps, so a stored collection round-trips without a
/// separate wire type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable id assigned at creation, immutable thereafter.
    pub id: NoteId,
    /// Short display title. Non-empty after trimming.
    pub title: String,
    /// Free-form body text. May be empty.
    pub content: String,
    /// One of the closed category set.
    pub category: Category,
    /// Completion flag, `false` at creation.
    pub completed: bool,
    /// Set once at creation, never mutated.
    pub created_at: DateTime<Utc>,
    /// Refreshed by every accepted mutation.
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note with a fresh id and current timestamps.
    ///
    /// Title and content are trimmed before storage; a blank title is
    /// rejected and nothing is constructed.
    pub fn new(
        title: &str,
        content: &str,
        category: Category,
    ) -> Result<Self, NoteValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.trim().to_string(),
            category,
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks the field invariants on this note.
    ///
    /// Used on every revived record before it enters the canonical list,
    /// mirroring the checks `new` applies at creation.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.updated_at < self.created_at {
            return Err(NoteValidationError::TimestampOrder);
        }
        Ok(())
    }

    /// Merges the present patch fields into this note and refreshes
    /// `updated_at`.
    ///
    /// The caller is expected to have validated the patch; a blank patched
    /// title would break the title invariant.
    pub fn apply(&mut self, patch: &NotePatch) {
        if let Some(title) = patch.title.as_deref() {
            self.title = title.trim().to_string();
        }
        if let Some(content) = patch.content.as_deref() {
            self.content = content.trim().to_string();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        self.touch();
    }

    /// Refreshes `updated_at` to the current instant.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Partial update for a note.
///
/// Any subset of title/content/category; `id`, `created_at` and the
/// completion flag are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    /// Replacement title, trimmed on apply. Must not be blank.
    pub title: Option<String>,
    /// Replacement body text, trimmed on apply.
    pub content: Option<String>,
    /// Replacement category.
    pub category: Option<Category>,
}

impl NotePatch {
    /// Returns whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.category.is_none()
    }

    /// Rejects patches that would break note invariants when applied.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if let Some(title) = self.title.as_deref() {
            if title.trim().is_empty() {
                return Err(NoteValidationError::EmptyTitle);
            }
        }
        Ok(())
    }
}
