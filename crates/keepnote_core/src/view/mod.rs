//! Derived, non-authoritative views over the canonical note list.
//!
//! # Responsibility
//! - Compute the visible subset for the active search/category criteria.
//! - Derive per-category counts for filter controls.

pub mod filter;
