//! Word replacement engine driven by pre-computed word embeddings.
//!
//! Words outside a controlled vocabulary are swapped for the vocabulary
//! word whose embedding is most similar under a pluggable metric, then
//! picked from a bounded top-N list by a pluggable strategy. Line shape
//! (spacing, trailing punctuation, leading capital) is preserved.
//!
//! Zero I/O. File parsing and settings live in `simplifier-store`.

pub mod candidates;
pub mod constants;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod metric;
pub mod selector;
pub mod strategy;
pub mod transformer;
pub mod vector;

pub use candidates::CandidateSet;
pub use constants::{DEFAULT_CANDIDATE_DELIMITER, DEFAULT_EMBEDDING_DELIMITER, DEFAULT_TOP_N};
pub use embedding::{Embedding, EmbeddingStore};
pub use engine::WordReplacer;
pub use error::{EngineError, Resource};
pub use metric::Metric;
pub use selector::{Scored, select_top_n};
pub use strategy::Strategy;
pub use transformer::{WordShape, capitalize_first, extract, transform_line};
