//! Segmentation and semantic retrieval utilities for regulatory documents.
//!
//! ```text
//! Raw document ──► segmenter::Segmenter ──► Vec<Section>
//!                                              │
//!                        (external encoder) EmbeddingProvider
//!                                              │
//!                                         EmbeddingMap
//!                                              │
//! Query ──► query::reformulate_query ──► retrieval::Retriever ──► ranked keys
//!                                              │
//!                              answer::is_unsatisfactory (quality gate)
//! ```
//!
//! Documents follow a `DIVISION <roman>` / `SUBTITLE <n>. <description>`
//! marker convention. [`Segmenter`] turns a document into labeled
//! [`Section`] records; an external [`EmbeddingProvider`] encodes each
//! section into an [`EmbeddingMap`]; [`Retriever`] ranks sections against a
//! (normalized) query by cosine similarity, with a confidence cutoff so
//! unrelated sections are never surfaced as answers.
//!
//! Everything operates on in-memory strings: no persistence, no network
//! protocol, no pipeline. The embedding encoder is the one external
//! collaborator, abstracted behind [`EmbeddingProvider`] and shared
//! process-wide behind an `Arc`.

pub mod answer;
pub mod config;
pub mod embeddings;
pub mod query;
pub mod retrieval;
pub mod segmenter;
pub mod types;

pub use answer::is_unsatisfactory;
pub use config::{QueryConfig, RetrievalConfig, SegmenterConfig};
pub use embeddings::{cosine_similarity, EmbeddingMap, EmbeddingProvider, MockEmbeddingProvider};
pub use query::reformulate_query;
pub use retrieval::{Retriever, RetrieverBuilder, NO_RELEVANT_SECTION};
pub use segmenter::Segmenter;
pub use types::{DivisionOutline, LexError, Section};
