//! Transcript processing for earnest.
//!
//! Currently this is the section splitter that drives per-section
//! summarization.

mod sections;

pub use sections::{split_into_sections, split_with_vocabulary, SECTION_HEADERS};
