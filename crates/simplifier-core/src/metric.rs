use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::vector;

/// Similarity metric: a vector kernel plus the direction in which it ranks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    DotProduct,
    #[default]
    Cosine,
    Euclidean,
    EuclideanNoSqrt,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::DotProduct,
        Metric::Cosine,
        Metric::Euclidean,
        Metric::EuclideanNoSqrt,
    ];

    pub fn calculate(self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Metric::DotProduct => vector::dot(a, b),
            Metric::Cosine => vector::cosine(a, b),
            Metric::Euclidean => vector::dist(a, b),
            Metric::EuclideanNoSqrt => vector::sq_dist(a, b),
        }
    }

    /// Similarity metrics rank high scores first; distances rank low first.
    pub fn higher_is_more_similar(self) -> bool {
        matches!(self, Metric::DotProduct | Metric::Cosine)
    }

    /// Fold the raw score onto a scale where larger always means more
    /// similar. NaN maps to -∞ so it is the first thing evicted.
    pub fn rank(self, score: f64) -> f64 {
        if score.is_nan() {
            f64::NEG_INFINITY
        } else if self.higher_is_more_similar() {
            score
        } else {
            -score
        }
    }

    /// Stable kebab-case key used on the command line and in settings.
    pub fn key(self) -> &'static str {
        match self {
            Metric::DotProduct => "dot-product",
            Metric::Cosine => "cosine",
            Metric::Euclidean => "euclidean",
            Metric::EuclideanNoSqrt => "euclidean-no-sqrt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::DotProduct => "Dot Product",
            Metric::Cosine => "Cosine Similarity",
            Metric::Euclidean => "Euclidean Distance",
            Metric::EuclideanNoSqrt => "Euclidean Distance (No Square Root)",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Metric::ALL
            .into_iter()
            .find(|m| m.key() == wanted)
            .ok_or_else(|| EngineError::UnknownVariant {
                kind: "metric",
                value: s.to_string(),
            })
    }
}
