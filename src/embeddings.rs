//! The embedding seam: provider trait, similarity math, and the
//! insertion-ordered section → vector map.
//!
//! The actual sentence encoder is an external collaborator; this crate only
//! defines the [`EmbeddingProvider`] trait it must satisfy and ships a
//! deterministic [`MockEmbeddingProvider`] so the retrieval paths can be
//! exercised in CI without a model download. One provider instance is
//! expected to live for the whole process and be shared read-only behind an
//! `Arc` (encoders are expensive to load and cheap to reuse).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::LexError;

// ── EmbeddingProvider ──────────────────────────────────────────────────

/// Interface to a sentence-embedding encoder.
///
/// Implementations must produce fixed-size vectors and be safe to share
/// across tasks; callers hold providers behind `Arc<dyn EmbeddingProvider>`.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Encode one text into a fixed-size vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LexError>;

    /// Encode a batch of texts. The default implementation loops
    /// [`embed`](Self::embed); providers with a native batch API should
    /// override it.
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, LexError> {
        let mut vectors = Vec::with_capacity(inputs.len());
        for input in inputs {
            vectors.push(self.embed(input).await?);
        }
        Ok(vectors)
    }

    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

// ── MockEmbeddingProvider ──────────────────────────────────────────────

/// Deterministic hash-seeded provider for tests and offline runs.
///
/// The same text always maps to the same unit vector and different texts
/// map to different vectors with overwhelming probability. The vectors
/// carry no semantic signal; they exist so ranking and threshold logic can
/// be tested deterministically.
#[derive(Debug, Clone)]
pub struct MockEmbeddingProvider {
    dimensions: usize,
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self { dimensions: 8 }
    }
}

impl MockEmbeddingProvider {
    /// Create a provider with the default (small) dimensionality.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider emitting vectors of the given dimensionality.
    #[must_use]
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        // FNV-1a over the text seeds an LCG; the stream is normalized to a
        // unit vector so cosine similarity degenerates to a dot product.
        let mut state = text.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        });

        let mut vector: Vec<f32> = (0..self.dimensions)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                ((state >> 40) as f32 / 8_388_608.0) - 1.0
            })
            .collect();

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LexError> {
        Ok(self.encode(text))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// ── Cosine similarity ──────────────────────────────────────────────────

/// Cosine similarity of two vectors, in `[-1, 1]`.
///
/// Returns `0.0` for mismatched lengths or zero-norm inputs rather than
/// erroring; a degenerate vector is simply unrelated to everything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

// ── EmbeddingMap ───────────────────────────────────────────────────────

/// Insertion-ordered mapping from section text to its embedding vector.
///
/// Iteration order is insertion order, which the retriever relies on for
/// deterministic tie-breaking. Re-inserting an existing key replaces the
/// vector in place without moving the entry. Lookups are linear; maps hold
/// one entry per document section, so the constant factor wins over hashing
/// at this scale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingMap {
    entries: Vec<(String, Vec<f32>)>,
}

impl EmbeddingMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Embed every text through `provider` and collect the results.
    ///
    /// This is the "external collaborator populates the map" flow: callers
    /// typically pass the content (or subtitle) of every segmented section.
    pub async fn index<I>(provider: &dyn EmbeddingProvider, texts: I) -> Result<Self, LexError>
    where
        I: IntoIterator<Item = String>,
    {
        let texts: Vec<String> = texts.into_iter().collect();
        let vectors = provider.embed_batch(&texts).await?;

        let mut map = Self::new();
        for (text, vector) in texts.into_iter().zip(vectors) {
            map.insert(text, vector);
        }
        Ok(map)
    }

    /// Insert or replace an entry. Replacement keeps the entry's position.
    pub fn insert(&mut self, key: impl Into<String>, embedding: Vec<f32>) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = embedding;
        } else {
            self.entries.push((key, embedding));
        }
    }

    /// Look up the embedding stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[f32]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // 1. Identical text yields identical vectors across calls.
    #[tokio::test]
    async fn mock_provider_is_deterministic() {
        let provider = MockEmbeddingProvider::new();
        let a = provider.embed("liability coverage").await.unwrap();
        let b = provider.embed("liability coverage").await.unwrap();
        assert_eq!(a, b);
    }

    // 2. Different texts yield different vectors.
    #[tokio::test]
    async fn mock_provider_separates_texts() {
        let provider = MockEmbeddingProvider::new();
        let a = provider.embed("liability coverage").await.unwrap();
        let b = provider.embed("claims procedures").await.unwrap();
        assert_ne!(a, b);
    }

    // 3. Mock vectors are unit-norm, so self-similarity is 1.
    #[tokio::test]
    async fn mock_vectors_are_normalized() {
        let provider = MockEmbeddingProvider::with_dimensions(16);
        let v = provider.embed("flood damage").await.unwrap();
        assert_eq!(v.len(), 16);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-5);
    }

    // 4. The default batch implementation preserves input order.
    #[tokio::test]
    async fn batch_preserves_order() {
        let provider = MockEmbeddingProvider::new();
        let inputs = vec!["one".to_string(), "two".to_string()];
        let batch = provider.embed_batch(&inputs).await.unwrap();
        assert_eq!(batch[0], provider.embed("one").await.unwrap());
        assert_eq!(batch[1], provider.embed("two").await.unwrap());
    }

    // 5. Cosine similarity basics: orthogonal, parallel, anti-parallel.
    #[test]
    fn cosine_similarity_reference_values() {
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < f32::EPSILON);
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    // 6. Degenerate inputs score 0 instead of erroring.
    #[test]
    fn cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    // 7. Insertion order survives, and re-insertion replaces in place.
    #[test]
    fn map_preserves_insertion_order_on_replace() {
        let mut map = EmbeddingMap::new();
        map.insert("first", vec![1.0]);
        map.insert("second", vec![2.0]);
        map.insert("first", vec![3.0]);

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["first", "second"]);
        assert_eq!(map.get("first"), Some([3.0].as_slice()));
        assert_eq!(map.len(), 2);
    }

    // 8. index() embeds every text and keys the map by it.
    #[tokio::test]
    async fn index_builds_map_from_provider() {
        let provider = MockEmbeddingProvider::new();
        let map = EmbeddingMap::index(
            &provider,
            vec!["alpha section".to_string(), "beta section".to_string()],
        )
        .await
        .unwrap();

        assert_eq!(map.len(), 2);
        let expected = provider.embed("alpha section").await.unwrap();
        assert_eq!(map.get("alpha section"), Some(expected.as_slice()));
    }
}
