//! Configuration types for segmentation, query normalization, and retrieval.
//!
//! Each config is a plain serde-derived struct with a `Default` impl and
//! `#[must_use]` builder setters. The defaults carry the constants tuned
//! against the regulatory corpus this crate was written for; callers with
//! different documents override them instead of patching the code.

use serde::{Deserialize, Serialize};

// ── SegmenterConfig ────────────────────────────────────────────────────

/// Configuration for the [`Segmenter`](crate::segmenter::Segmenter).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SegmenterConfig {
    /// Minimum description length (in characters, after leading whitespace
    /// is dropped) for a subtitle match to be retained. Shorter matches are
    /// treated as truncated fragments. Default: 10.
    pub min_description_chars: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_description_chars: 10,
        }
    }
}

impl SegmenterConfig {
    /// Create a new config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum retained description length.
    #[must_use]
    pub fn min_description_chars(mut self, chars: usize) -> Self {
        self.min_description_chars = chars;
        self
    }
}

// ── QueryConfig ────────────────────────────────────────────────────────

/// Configuration for [`reformulate_query`](crate::query::reformulate_query).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QueryConfig {
    /// Tokens removed from queries after case-folding. Matching is exact
    /// per whitespace-separated token; no stemming, no phrases.
    pub stopwords: Vec<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stopwords: ["does", "is", "are", "me", "my", "a", "?"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl QueryConfig {
    /// Create a new config with the default stopword set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stopword set.
    #[must_use]
    pub fn stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = words.into_iter().map(Into::into).collect();
        self
    }
}

// ── RetrievalConfig ────────────────────────────────────────────────────

/// Configuration for the [`Retriever`](crate::retrieval::Retriever).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Minimum cosine similarity for a single-best match to be surfaced.
    /// Below this, [`retrieve_most_relevant`] returns the sentinel instead
    /// of a section key. Default: 0.6.
    ///
    /// [`retrieve_most_relevant`]: crate::retrieval::Retriever::retrieve_most_relevant
    pub similarity_threshold: f32,
    /// Number of keys returned by [`retrieve_top`]. Default: 3.
    ///
    /// [`retrieve_top`]: crate::retrieval::Retriever::retrieve_top
    pub top_n: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            top_n: 3,
        }
    }
}

impl RetrievalConfig {
    /// Create a new config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the single-best similarity cutoff.
    #[must_use]
    pub fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Set the default top-N result count.
    #[must_use]
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segmenter_defaults() {
        let config = SegmenterConfig::new();
        assert_eq!(config.min_description_chars, 10);
    }

    #[test]
    fn query_defaults_contain_question_mark_token() {
        let config = QueryConfig::new();
        assert!(config.stopwords.iter().any(|s| s == "?"));
        assert_eq!(config.stopwords.len(), 7);
    }

    #[test]
    fn retrieval_defaults() {
        let config = RetrievalConfig::new();
        assert!((config.similarity_threshold - 0.6).abs() < f32::EPSILON);
        assert_eq!(config.top_n, 3);
    }

    #[test]
    fn builder_setters_override() {
        let config = RetrievalConfig::new().similarity_threshold(0.8).top_n(5);
        assert!((config.similarity_threshold - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.top_n, 5);
    }
}
