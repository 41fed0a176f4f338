//! Language detection and tree-sitter plumbing
//!
//! Provides language identification for the two supported languages and the
//! text-diff machinery used for incremental re-parses.

mod edit;
mod languages;

pub use edit::{byte_to_point, compute_incremental_edit};
pub use languages::LanguageId;
