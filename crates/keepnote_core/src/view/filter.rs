//! View filtering and category counts.
//!
//! # Responsibility
//! - Decide which notes are visible for a search term and category pick.
//! - Count notes per category over the unfiltered collection.
//!
//! # Invariants
//! - Filtering is pure and never reorders; canonical order is kept.
//! - Counts ignore the active filter entirely.

use crate::model::note::{Category, Note};

/// Category criterion for the visible subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category matches.
    #[default]
    All,
    /// Only the given category matches.
    Only(Category),
}

impl CategoryFilter {
    /// Parses the filter token: `all` or a category name.
    pub fn parse(value: &str) -> Option<CategoryFilter> {
        if value == "all" {
            return Some(CategoryFilter::All);
        }
        Category::parse(value).map(CategoryFilter::Only)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

/// Active view criteria: a search term and a category pick.
///
/// The default query (empty term, all categories) matches every note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Case-insensitive substring matched against title and content.
    /// The empty term matches everything; the term is not trimmed, so
    /// whitespace in it is significant.
    pub search_term: String,
    /// Category criterion.
    pub category: CategoryFilter,
}

impl ViewQuery {
    /// Returns whether the query narrows nothing.
    ///
    /// A whitespace-only term still counts as an active search; only the
    /// truly empty term is unfiltered.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty() && self.category == CategoryFilter::All
    }

    /// Returns whether the note satisfies both criteria.
    pub fn matches(&self, note: &Note) -> bool {
        let category_ok = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => note.category == category,
        };
        if !category_ok {
            return false;
        }

        if self.search_term.is_empty() {
            return true;
        }
        let term = self.search_term.to_lowercase();
        note.title.to_lowercase().contains(&term) || note.content.to_lowercase().contains(&term)
    }
}

/// Returns the visible sub-sequence for the query.
///
/// Survivors keep their position relative to each other; the canonical
/// newest-first order is never re-sorted here.
pub fn filter_notes<'a>(notes: &'a [Note], query: &ViewQuery) -> Vec<&'a Note> {
    notes.iter().filter(|note| query.matches(note)).collect()
}

/// Per-category counts over the unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub total: usize,
    pub personal: usize,
    pub work: usize,
    pub urgent: usize,
}

impl CategoryCounts {
    /// Returns the count backing the given filter control.
    pub fn get(self, filter: CategoryFilter) -> usize {
        match filter {
            CategoryFilter::All => self.total,
            CategoryFilter::Only(Category::Personal) => self.personal,
            CategoryFilter::Only(Category::Work) => self.work,
            CategoryFilter::Only(Category::Urgent) => self.urgent,
        }
    }
}

/// Derives the per-category counts plus the total.
///
/// Always fed the full canonical list, never a filtered view, so the
/// numbers stay stable while the user narrows the visible subset.
pub fn category_counts(notes: &[Note]) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for note in notes {
        counts.total += 1;
        match note.category {
            Category::Personal => counts.personal += 1,
            Category::Work => counts.work += 1,
            Category::Urgent => counts.urgent += 1,
        }
    }
    counts
}
