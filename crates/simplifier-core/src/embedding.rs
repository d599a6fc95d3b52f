use std::collections::HashMap;

/// A word's vector plus its lazily computed replacement candidates.
///
/// The vector is fixed at load. The candidate list is a derived view of
/// (vector data × engine configuration) and is only valid for the
/// configuration generation it was computed under.
#[derive(Clone, Debug)]
pub struct Embedding {
    vector: Vec<f64>,
    cache: Option<(u64, Vec<String>)>,
}

impl Embedding {
    pub fn new(vector: Vec<f64>) -> Self {
        Self {
            vector,
            cache: None,
        }
    }

    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    /// Cached candidates, if they were computed under `generation`.
    pub fn candidates(&self, generation: u64) -> Option<&[String]> {
        match &self.cache {
            Some((g, words)) if *g == generation => Some(words),
            _ => None,
        }
    }

    pub fn set_candidates(&mut self, generation: u64, words: Vec<String>) {
        self.cache = Some((generation, words));
    }
}

/// Load-once mapping from word to [`Embedding`].
///
/// Built whole from an iterator and swapped whole; there is no per-entry
/// insert. Duplicate words keep the last vector seen.
#[derive(Clone, Debug, Default)]
pub struct EmbeddingStore {
    embeddings: HashMap<String, Embedding>,
    dimension: usize,
}

impl EmbeddingStore {
    pub fn get(&self, word: &str) -> Option<&Embedding> {
        self.embeddings.get(word)
    }

    pub(crate) fn get_mut(&mut self, word: &str) -> Option<&mut Embedding> {
        self.embeddings.get_mut(word)
    }

    pub fn vector(&self, word: &str) -> Option<&[f64]> {
        self.embeddings.get(word).map(Embedding::vector)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.embeddings.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }

    /// Vector length of the first entry loaded; 0 when empty.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.embeddings.keys().map(String::as_str)
    }

    /// Number of entries holding a candidate list for `generation`.
    pub fn cached_count(&self, generation: u64) -> usize {
        self.embeddings
            .values()
            .filter(|e| e.candidates(generation).is_some())
            .count()
    }
}

impl FromIterator<(String, Vec<f64>)> for EmbeddingStore {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f64>)>>(iter: I) -> Self {
        let mut embeddings = HashMap::new();
        let mut dimension = None;
        for (word, vector) in iter {
            dimension.get_or_insert(vector.len());
            embeddings.insert(word, Embedding::new(vector));
        }
        Self {
            embeddings,
            dimension: dimension.unwrap_or(0),
        }
    }
}
