use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::candidates::CandidateSet;
use crate::constants::DEFAULT_TOP_N;
use crate::embedding::EmbeddingStore;
use crate::error::{EngineError, Resource, Result};
use crate::metric::Metric;
use crate::selector::{Scored, select_top_n};
use crate::strategy::Strategy;
use crate::transformer::transform_line;

/// Replacement engine: owns both stores and the active configuration.
///
/// Per-word candidate lists are cached inside the embedding store and tagged
/// with a configuration generation. Every setter bumps the generation, so
/// a list computed under an older (metric, strategy, N, vocabulary) is
/// never served; it is recomputed on the next lookup instead.
pub struct WordReplacer {
    embeddings: EmbeddingStore,
    candidates: CandidateSet,
    metric: Metric,
    strategy: Strategy,
    top_n: usize,
    generation: u64,
    rng: SmallRng,
}

impl Default for WordReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl WordReplacer {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Deterministic random strategies, for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: SmallRng) -> Self {
        Self {
            embeddings: EmbeddingStore::default(),
            candidates: CandidateSet::default(),
            metric: Metric::default(),
            strategy: Strategy::default(),
            top_n: DEFAULT_TOP_N,
            generation: 0,
            rng,
        }
    }

    // --- Configuration ---

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
        self.invalidate();
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
        self.invalidate();
    }

    /// Values below 1 are clamped to 1.
    pub fn set_top_n(&mut self, n: usize) {
        self.top_n = n.max(1);
        self.invalidate();
    }

    pub fn set_embeddings(&mut self, embeddings: EmbeddingStore) {
        self.embeddings = embeddings;
        self.invalidate();
    }

    /// Lists cached against the old vocabulary are invalidated along with it.
    pub fn set_candidates(&mut self, candidates: CandidateSet) {
        self.candidates = candidates;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    // --- Stores ---

    pub fn embeddings(&self) -> &EmbeddingStore {
        &self.embeddings
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Words whose candidate list is valid under the current configuration.
    pub fn cached_count(&self) -> usize {
        self.embeddings.cached_count(self.generation)
    }

    /// Both stores must hold at least one entry before text is replaced.
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.embeddings.is_empty() {
            return Err(EngineError::NotInitialized {
                missing: Resource::Embeddings,
            });
        }
        if self.candidates.is_empty() {
            return Err(EngineError::NotInitialized {
                missing: Resource::Candidates,
            });
        }
        Ok(())
    }

    // --- Replacement ---

    /// Replace one lowercase word.
    ///
    /// Words already in the vocabulary, and words with no embedding, come
    /// back unchanged. So does a word whose candidate list is empty (no
    /// vocabulary word has an embedding).
    pub fn replace_word(&mut self, word: &str) -> String {
        if self.candidates.contains(word) {
            return word.to_string();
        }

        let generation = self.generation;
        let Some(embedding) = self.embeddings.get(word) else {
            return word.to_string();
        };

        if embedding.candidates(generation).is_none() {
            let words: Vec<String> = select_top_n(
                self.candidates.iter(),
                &self.embeddings,
                embedding.vector(),
                self.metric,
                self.top_n,
            )
            .into_iter()
            .map(|s| s.word)
            .collect();
            if let Some(embedding) = self.embeddings.get_mut(word) {
                embedding.set_candidates(generation, words);
            }
        }

        let cached = self
            .embeddings
            .get(word)
            .and_then(|e| e.candidates(generation))
            .unwrap_or_default();
        if cached.is_empty() {
            return word.to_string();
        }
        self.strategy.pick(cached, &mut self.rng)
    }

    /// Replace every word in one line, preserving spacing, punctuation and
    /// leading capitals.
    pub fn replace_text(&mut self, line: &str) -> Result<String> {
        self.ensure_initialized()?;
        Ok(transform_line(line, |word| self.replace_word(word)))
    }

    /// Scored top-N candidates for `word`, least → most similar.
    /// `None` when the word has no embedding. Bypasses the cache.
    pub fn similar_words(&self, word: &str) -> Option<Vec<Scored>> {
        let query = self.embeddings.vector(word)?;
        Some(select_top_n(
            self.candidates.iter(),
            &self.embeddings,
            query,
            self.metric,
            self.top_n,
        ))
    }
}
