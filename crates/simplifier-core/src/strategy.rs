use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Policy for picking one output from a least → most similar candidate list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    MostSimilar,
    LeastSimilar,
    Random,
    BiasedMostSimilar,
    /// Every candidate, rendered as `[a, b, c]`.
    Array,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::MostSimilar,
        Strategy::LeastSimilar,
        Strategy::Random,
        Strategy::BiasedMostSimilar,
        Strategy::Array,
    ];

    /// Pick a replacement. Every variant returns `""` for an empty list,
    /// except `Array` which renders `[]`.
    pub fn pick(self, candidates: &[String], rng: &mut impl Rng) -> String {
        match self {
            Strategy::MostSimilar => candidates.last().cloned().unwrap_or_default(),
            Strategy::LeastSimilar => candidates.first().cloned().unwrap_or_default(),
            Strategy::Random => {
                if candidates.is_empty() {
                    return String::new();
                }
                candidates[rng.random_range(0..candidates.len())].clone()
            }
            Strategy::BiasedMostSimilar => biased_toward_end(candidates, rng),
            Strategy::Array => format!("[{}]", candidates.join(", ")),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Strategy::MostSimilar => "most-similar",
            Strategy::LeastSimilar => "least-similar",
            Strategy::Random => "random",
            Strategy::BiasedMostSimilar => "biased-most-similar",
            Strategy::Array => "array",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::MostSimilar => "Most Similar Word",
            Strategy::LeastSimilar => "Least Similar Word",
            Strategy::Random => "Random Word from List",
            Strategy::BiasedMostSimilar => "Biased Toward Most Similar Word from List",
            Strategy::Array => "Array/List of Words",
        }
    }
}

/// Weighted draw where index `i` carries weight `i + 1`.
fn biased_toward_end(candidates: &[String], rng: &mut impl Rng) -> String {
    if candidates.is_empty() {
        return String::new();
    }

    let weight = |i: usize| (i + 1) as f64;
    let total: f64 = (0..candidates.len()).map(weight).sum();
    let draw = rng.random_range(0.0..total);

    let mut cumulative = 0.0;
    for (i, word) in candidates.iter().enumerate() {
        cumulative += weight(i);
        if draw < cumulative {
            return word.clone();
        }
    }
    String::new()
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Strategy::ALL
            .into_iter()
            .find(|m| m.key() == wanted)
            .ok_or_else(|| EngineError::UnknownVariant {
                kind: "strategy",
                value: s.to_string(),
            })
    }
}
