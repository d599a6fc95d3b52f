//! Property tests for the vector kernels, top-N selection and the engine.

use proptest::prelude::*;
use simplifier_core::{
    CandidateSet, EmbeddingStore, Metric, WordReplacer, select_top_n, vector,
};

fn vector_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..16).prop_flat_map(|n| {
        (
            prop::collection::vec(-100.0f64..100.0, n),
            prop::collection::vec(-100.0f64..100.0, n),
        )
    })
}

fn metric() -> impl Strategy<Value = Metric> {
    prop::sample::select(Metric::ALL.to_vec())
}

/// Vocabulary `w0..wk` with 3-d vectors plus a query vector.
fn pool() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>)> {
    (
        prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 3), 1..24),
        prop::collection::vec(-10.0f64..10.0, 3),
    )
}

fn store_of(vectors: &[Vec<f64>]) -> EmbeddingStore {
    vectors
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("w{i}"), v.clone()))
        .collect()
}

proptest! {
    #[test]
    fn cosine_is_bounded((a, b) in vector_pair()) {
        prop_assume!(vector::norm(&a) > 1e-9 && vector::norm(&b) > 1e-9);
        let c = vector::cosine(&a, &b);
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&c), "cosine = {c}");
    }

    #[test]
    fn distance_is_non_negative_and_squares((a, b) in vector_pair()) {
        let d = vector::dist(&a, &b);
        let sq = vector::sq_dist(&a, &b);
        prop_assert!(d >= 0.0);
        prop_assert!((sq - d * d).abs() <= 1e-9 * sq.max(1.0));
    }

    #[test]
    fn self_dot_is_squared_norm((a, _) in vector_pair()) {
        let n = vector::norm(&a);
        let d = vector::dot(&a, &a);
        prop_assert!((d - n * n).abs() <= 1e-9 * d.max(1.0));
    }

    #[test]
    fn top_n_is_bounded_sorted_and_ends_on_best(
        (vectors, query) in pool(),
        n in 1usize..8,
        metric in metric(),
    ) {
        let store = store_of(&vectors);
        let words: Vec<String> = (0..vectors.len()).map(|i| format!("w{i}")).collect();
        let got = select_top_n(words.iter().map(String::as_str), &store, &query, metric, n);

        prop_assert_eq!(got.len(), n.min(vectors.len()));

        let ranks: Vec<f64> = got.iter().map(|s| metric.rank(s.score)).collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "ranks = {:?}", ranks);

        let best = vectors
            .iter()
            .map(|v| metric.rank(metric.calculate(v, &query)))
            .fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(*ranks.last().unwrap(), best);
    }

    #[test]
    fn vocabulary_words_are_fixed_points((vectors, _) in pool(), metric in metric()) {
        let mut engine = WordReplacer::seeded(1);
        engine.set_embeddings(store_of(&vectors));
        let vocab: CandidateSet = (0..vectors.len()).step_by(2).map(|i| format!("w{i}")).collect();
        engine.set_candidates(vocab.clone());
        engine.set_metric(metric);

        for word in vocab.iter() {
            prop_assert_eq!(engine.replace_word(word), word);
        }
    }
}
