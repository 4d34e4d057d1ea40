//! Shared record types and the crate-wide error enum.

use serde::{Deserialize, Serialize};

/// Errors surfaced by lexsmith operations.
///
/// Segmentation itself never fails (malformed documents produce incomplete
/// or empty results instead); the fallible paths are the ones that cross the
/// embedding seam.
#[derive(Debug, thiserror::Error)]
pub enum LexError {
    /// The embedding provider failed to encode text.
    #[error("embedding failed: {0}")]
    Embedding(String),
}

/// One retained subtitle of a segmented document, with its parent division
/// title and the content extracted for it.
///
/// Sections are derived from a document by [`Segmenter::split_sections`];
/// they do not exist independently of a segmentation pass.
///
/// [`Segmenter::split_sections`]: crate::segmenter::Segmenter::split_sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Division marker string, e.g. `"DIVISION IV"`.
    pub title: String,
    /// Composed `"<number> <description>"` subtitle.
    pub subtitle: String,
    /// Document substring from the subtitle occurrence to the next division
    /// marker (empty when the subtitle could not be located).
    pub content: String,
}

/// A division marker together with the cleaned subtitles found in its span,
/// in document order.
///
/// This is the ordered division → subtitles mapping produced by
/// [`Segmenter::outline`]. A `Vec` of records is used rather than a hash
/// map so document order survives iteration.
///
/// [`Segmenter::outline`]: crate::segmenter::Segmenter::outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionOutline {
    /// Division marker string, e.g. `"DIVISION II"`.
    pub title: String,
    /// Cleaned `"<number> <description>"` subtitles belonging to this
    /// division. Empty when the division contains no retained subtitles.
    pub subtitles: Vec<String>,
}
