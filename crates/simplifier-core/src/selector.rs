use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::embedding::EmbeddingStore;
use crate::metric::Metric;

/// A candidate word and its raw metric score against the query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scored {
    pub word: String,
    pub score: f64,
}

/// Heap entry ordered by similarity: greater = more similar.
/// Equal ranks fall back to the word, lexicographically smaller first.
struct Ranked {
    rank: f64,
    scored: Scored,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .partial_cmp(&other.rank)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.scored.word.cmp(&self.scored.word))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// Select the `n` candidates most similar to `query`.
///
/// Keeps a min-heap of at most `n` entries whose root is the least similar
/// retained candidate, evicting it whenever the heap overflows. Candidates
/// missing from `store` are skipped. The result runs least → most similar,
/// so the best match is last.
///
/// O(R·d + R·log n) for R candidates of dimension d.
pub fn select_top_n<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    store: &EmbeddingStore,
    query: &[f64],
    metric: Metric,
    n: usize,
) -> Vec<Scored> {
    if n == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<Ranked>> = BinaryHeap::with_capacity(n + 1);

    for word in candidates {
        let Some(vector) = store.vector(word) else {
            continue;
        };
        let score = metric.calculate(vector, query);
        heap.push(Reverse(Ranked {
            rank: metric.rank(score),
            scored: Scored {
                word: word.to_string(),
                score,
            },
        }));
        if heap.len() > n {
            heap.pop();
        }
    }

    let mut ordered = Vec::with_capacity(heap.len());
    while let Some(Reverse(ranked)) = heap.pop() {
        ordered.push(ranked.scored);
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> EmbeddingStore {
        [
            ("cat", vec![1.0, 0.0]),
            ("dog", vec![0.9, 0.1]),
            ("car", vec![0.0, 1.0]),
            ("cow", vec![0.7, 0.3]),
            ("zero", vec![0.0, 0.0]),
        ]
        .into_iter()
        .map(|(w, v)| (w.to_string(), v))
        .collect()
    }

    fn words(scored: &[Scored]) -> Vec<&str> {
        scored.iter().map(|s| s.word.as_str()).collect()
    }

    #[test]
    fn test_cosine_orders_least_to_most() {
        let s = store();
        let got = select_top_n(["dog", "car", "cow"], &s, &[1.0, 0.0], Metric::Cosine, 3);
        assert_eq!(words(&got), vec!["car", "cow", "dog"]);
    }

    #[test]
    fn test_bounded_to_n() {
        let s = store();
        let got = select_top_n(["dog", "car", "cow"], &s, &[1.0, 0.0], Metric::Cosine, 2);
        assert_eq!(words(&got), vec!["cow", "dog"]);
    }

    #[test]
    fn test_distance_prefers_small() {
        let s = store();
        let got = select_top_n(["dog", "car", "cow"], &s, &[1.0, 0.0], Metric::Euclidean, 1);
        assert_eq!(words(&got), vec!["dog"]);
        let got = select_top_n(["dog", "car", "cow"], &s, &[1.0, 0.0], Metric::EuclideanNoSqrt, 3);
        assert_eq!(words(&got), vec!["car", "cow", "dog"]);
    }

    #[test]
    fn test_missing_candidates_skipped() {
        let s = store();
        let got = select_top_n(["dog", "unicorn"], &s, &[1.0, 0.0], Metric::Cosine, 5);
        assert_eq!(words(&got), vec!["dog"]);
    }

    #[test]
    fn test_zero_n_is_empty() {
        let s = store();
        assert!(select_top_n(["dog"], &s, &[1.0, 0.0], Metric::Cosine, 0).is_empty());
    }

    #[test]
    fn test_nan_never_beats_real_score() {
        let s = store();
        let got = select_top_n(["zero", "car"], &s, &[1.0, 0.0], Metric::Cosine, 1);
        assert_eq!(words(&got), vec!["car"]);
        let got = select_top_n(["zero", "car"], &s, &[1.0, 0.0], Metric::Cosine, 2);
        assert_eq!(got[0].word, "zero");
        assert!(got[0].score.is_nan());
    }

    #[test]
    fn test_ties_break_on_word() {
        let s: EmbeddingStore = [("b", vec![1.0]), ("a", vec![1.0]), ("c", vec![1.0])]
            .into_iter()
            .map(|(w, v)| (w.to_string(), v))
            .collect();
        let got = select_top_n(["c", "b", "a"], &s, &[1.0], Metric::DotProduct, 2);
        // "a" outranks "b" outranks "c"; most similar last.
        assert_eq!(words(&got), vec!["b", "a"]);
    }

    #[test]
    fn test_scores_are_raw() {
        let s = store();
        let got = select_top_n(["car"], &s, &[1.0, 0.0], Metric::EuclideanNoSqrt, 1);
        assert_eq!(got[0].score, 2.0);
    }
}
