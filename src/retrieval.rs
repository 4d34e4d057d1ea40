//! Ranking sections against a query by embedding similarity.
//!
//! [`Retriever`] holds a shared embedding provider plus a
//! [`RetrievalConfig`] and offers two read paths over an [`EmbeddingMap`]:
//! the top-N ranking used to shortlist candidate sections, and the
//! single-best lookup with a confidence cutoff so unrelated sections are
//! never surfaced as answers.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::embeddings::{cosine_similarity, EmbeddingMap, EmbeddingProvider};
use crate::types::LexError;

/// Sentinel returned by [`Retriever::retrieve_most_relevant`] when no entry
/// clears the similarity threshold. Callers must check for this value; it is
/// deliberately not an error.
pub const NO_RELEVANT_SECTION: &str = "No relevant section found.";

// ── Retriever ──────────────────────────────────────────────────────────

/// Similarity-based section retriever.
///
/// The provider is held behind an `Arc` so one process-wide encoder can be
/// shared across retrievers and with whatever indexed the [`EmbeddingMap`].
///
/// # Examples
///
/// ```
/// use lexsmith::embeddings::{EmbeddingMap, MockEmbeddingProvider};
/// use lexsmith::retrieval::Retriever;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), lexsmith::types::LexError> {
/// let provider = MockEmbeddingProvider::new();
/// let map = EmbeddingMap::index(&provider, vec!["1 Liability coverage".to_string()]).await?;
///
/// let retriever = Retriever::builder().provider(provider).build();
/// let top = retriever.retrieve_top("liability", &map).await?;
/// assert_eq!(top.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct Retriever {
    provider: Arc<dyn EmbeddingProvider>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Create a new builder for constructing a `Retriever`.
    #[must_use]
    pub fn builder() -> RetrieverBuilder {
        RetrieverBuilder::default()
    }

    /// Rank every map entry by cosine similarity to `query` and return the
    /// top `n` keys, best first. Scores are discarded from the result.
    ///
    /// The sort is stable, so entries with exactly equal similarity keep
    /// their insertion order. When `n` exceeds the map size, all keys are
    /// returned sorted. An empty map yields an empty list.
    pub async fn retrieve_top_n(
        &self,
        query: &str,
        embeddings: &EmbeddingMap,
        n: usize,
    ) -> Result<Vec<String>, LexError> {
        let query_embedding = self.provider.embed(query).await?;

        let mut scored: Vec<(&str, f32)> = embeddings
            .iter()
            .map(|(text, vector)| (text, cosine_similarity(&query_embedding, vector)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(n);

        Ok(scored.into_iter().map(|(text, _)| text.to_string()).collect())
    }

    /// [`retrieve_top_n`](Self::retrieve_top_n) with the configured default
    /// result count.
    pub async fn retrieve_top(
        &self,
        query: &str,
        embeddings: &EmbeddingMap,
    ) -> Result<Vec<String>, LexError> {
        self.retrieve_top_n(query, embeddings, self.config.top_n).await
    }

    /// Return the single best-matching key, or [`NO_RELEVANT_SECTION`] when
    /// the best similarity falls below the configured threshold.
    ///
    /// The scan tracks a strict running maximum, so the first entry seen
    /// wins exact ties. An empty map always yields the sentinel.
    pub async fn retrieve_most_relevant(
        &self,
        query: &str,
        embeddings: &EmbeddingMap,
    ) -> Result<String, LexError> {
        let query_embedding = self.provider.embed(query).await?;

        let mut max_similarity = -1.0_f32;
        let mut most_relevant = "";

        for (text, vector) in embeddings.iter() {
            let similarity = cosine_similarity(&query_embedding, vector);
            if similarity > max_similarity {
                max_similarity = similarity;
                most_relevant = text;
            }
        }

        if max_similarity < self.config.similarity_threshold {
            return Ok(NO_RELEVANT_SECTION.to_string());
        }
        Ok(most_relevant.to_string())
    }
}

// ── RetrieverBuilder ───────────────────────────────────────────────────

/// Builder for constructing [`Retriever`] instances.
#[derive(Default)]
pub struct RetrieverBuilder {
    provider: Option<Arc<dyn EmbeddingProvider>>,
    config: Option<RetrievalConfig>,
}

impl RetrieverBuilder {
    /// Set the embedding provider.
    ///
    /// This is required before calling [`build()`](Self::build).
    #[must_use]
    pub fn provider(mut self, provider: impl EmbeddingProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Set the embedding provider from an existing `Arc`.
    ///
    /// Use this to share one encoder across retrievers.
    #[must_use]
    pub fn provider_arc(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the retrieval configuration. Defaults to
    /// [`RetrievalConfig::default`].
    #[must_use]
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the [`Retriever`].
    ///
    /// # Panics
    ///
    /// Panics if no provider was set.
    #[must_use]
    pub fn build(self) -> Retriever {
        Retriever {
            provider: self
                .provider
                .expect("RetrieverBuilder requires an embedding provider"),
            config: self.config.unwrap_or_default(),
        }
    }

    /// Build the [`Retriever`], returning `None` if no provider was set.
    #[must_use]
    pub fn try_build(self) -> Option<Retriever> {
        Some(Retriever {
            provider: self.provider?,
            config: self.config.unwrap_or_default(),
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Provider that encodes every query as the fixed unit vector `[1, 0]`,
    /// so map entries at known angles produce exact similarity scores.
    struct UnitXProvider;

    #[async_trait]
    impl EmbeddingProvider for UnitXProvider {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, LexError> {
            Ok(vec![1.0, 0.0])
        }

        fn name(&self) -> &'static str {
            "unit-x"
        }
    }

    /// Unit vector whose cosine against `[1, 0]` is exactly `x`.
    fn at_similarity(x: f32) -> Vec<f32> {
        vec![x, (1.0 - x * x).sqrt()]
    }

    fn retriever() -> Retriever {
        Retriever::builder().provider(UnitXProvider).build()
    }

    // 1. Top-n returns exactly n keys in descending similarity order.
    #[tokio::test]
    async fn top_n_ranks_descending() {
        let mut map = EmbeddingMap::new();
        map.insert("low", at_similarity(0.2));
        map.insert("high", at_similarity(0.9));
        map.insert("mid", at_similarity(0.5));
        map.insert("floor", at_similarity(0.1));
        map.insert("near", at_similarity(0.8));

        let top = retriever().retrieve_top_n("q", &map, 3).await.unwrap();
        assert_eq!(top, vec!["high", "near", "mid"]);
    }

    // 2. n larger than the map returns every key, still sorted.
    #[tokio::test]
    async fn top_n_with_oversized_n_returns_all() {
        let mut map = EmbeddingMap::new();
        map.insert("low", at_similarity(0.2));
        map.insert("high", at_similarity(0.9));

        let top = retriever().retrieve_top_n("q", &map, 10).await.unwrap();
        assert_eq!(top, vec!["high", "low"]);
    }

    // 3. Exact ties keep the map's insertion order (stable sort).
    #[tokio::test]
    async fn top_n_ties_keep_insertion_order() {
        let mut map = EmbeddingMap::new();
        map.insert("first", at_similarity(0.5));
        map.insert("second", at_similarity(0.5));
        map.insert("third", at_similarity(0.7));

        let top = retriever().retrieve_top_n("q", &map, 3).await.unwrap();
        assert_eq!(top, vec!["third", "first", "second"]);
    }

    // 4. An empty map yields an empty top-n list.
    #[tokio::test]
    async fn top_n_on_empty_map_is_empty() {
        let map = EmbeddingMap::new();
        let top = retriever().retrieve_top_n("q", &map, 3).await.unwrap();
        assert!(top.is_empty());
    }

    // 5. retrieve_top uses the configured default count.
    #[tokio::test]
    async fn retrieve_top_honors_configured_n() {
        let mut map = EmbeddingMap::new();
        for (i, key) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            map.insert(*key, at_similarity(0.1 * (i as f32 + 1.0)));
        }

        let retriever = Retriever::builder()
            .provider(UnitXProvider)
            .config(RetrievalConfig::new().top_n(2))
            .build();
        let top = retriever.retrieve_top("q", &map).await.unwrap();
        assert_eq!(top.len(), 2);
    }

    // 6. Best similarity just below the threshold yields the sentinel.
    #[tokio::test]
    async fn below_threshold_returns_sentinel() {
        let mut map = EmbeddingMap::new();
        map.insert("almost", at_similarity(0.59));

        let best = retriever().retrieve_most_relevant("q", &map).await.unwrap();
        assert_eq!(best, NO_RELEVANT_SECTION);
    }

    // 7. Best similarity just above the threshold yields that key.
    #[tokio::test]
    async fn above_threshold_returns_key() {
        let mut map = EmbeddingMap::new();
        map.insert("weak", at_similarity(0.3));
        map.insert("strong", at_similarity(0.61));

        let best = retriever().retrieve_most_relevant("q", &map).await.unwrap();
        assert_eq!(best, "strong");
    }

    // 8. On exact ties the first-seen entry wins (strict comparison).
    #[tokio::test]
    async fn most_relevant_first_seen_wins_ties() {
        let mut map = EmbeddingMap::new();
        map.insert("first", at_similarity(0.8));
        map.insert("second", at_similarity(0.8));

        let best = retriever().retrieve_most_relevant("q", &map).await.unwrap();
        assert_eq!(best, "first");
    }

    // 9. An empty map yields the sentinel, never a panic.
    #[tokio::test]
    async fn most_relevant_on_empty_map_is_sentinel() {
        let map = EmbeddingMap::new();
        let best = retriever().retrieve_most_relevant("q", &map).await.unwrap();
        assert_eq!(best, NO_RELEVANT_SECTION);
    }

    // 10. The threshold is configurable.
    #[tokio::test]
    async fn threshold_is_configurable() {
        let mut map = EmbeddingMap::new();
        map.insert("middling", at_similarity(0.5));

        let strict = Retriever::builder()
            .provider(UnitXProvider)
            .config(RetrievalConfig::new().similarity_threshold(0.4))
            .build();
        let best = strict.retrieve_most_relevant("q", &map).await.unwrap();
        assert_eq!(best, "middling");
    }

    // 11. A builder without a provider cannot produce a retriever.
    #[test]
    fn builder_requires_provider() {
        assert!(RetrieverBuilder::default().try_build().is_none());
    }
}
