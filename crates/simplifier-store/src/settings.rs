use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};
use simplifier_core::{
    DEFAULT_CANDIDATE_DELIMITER, DEFAULT_EMBEDDING_DELIMITER, DEFAULT_TOP_N, Metric, Strategy,
    WordReplacer,
};

use crate::error::{Result, StoreError};
use crate::loader::{load_candidates, load_embeddings};

const SETTINGS_FILE: &str = "settings.toml";

/// Default base directory for persisted settings.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".simplifier")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Keys accepted by [`Settings::set`].
pub const KEYS: [&str; 9] = [
    "embeddings",
    "candidates",
    "input",
    "output",
    "embedding-delimiter",
    "candidate-delimiter",
    "top-n",
    "metric",
    "strategy",
];

/// User preferences persisted as TOML. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub embeddings: PathBuf,
    pub candidates: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub embedding_delimiter: String,
    pub candidate_delimiter: String,
    pub top_n: usize,
    pub metric: Metric,
    pub strategy: Strategy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            embeddings: PathBuf::from("../word-embeddings.txt"),
            candidates: PathBuf::from("../google-1000.txt"),
            input: PathBuf::from("../input.txt"),
            output: PathBuf::from("../output.txt"),
            embedding_delimiter: DEFAULT_EMBEDDING_DELIMITER.to_string(),
            candidate_delimiter: DEFAULT_CANDIDATE_DELIMITER.to_string(),
            top_n: DEFAULT_TOP_N,
            metric: Metric::default(),
            strategy: Strategy::default(),
        }
    }
}

impl Settings {
    /// Path of the settings file under `base_dir` (or the default base).
    pub fn path(base_dir: Option<&Path>) -> PathBuf {
        base_dir
            .map(PathBuf::from)
            .unwrap_or_else(default_base_dir)
            .join(SETTINGS_FILE)
    }

    /// Read settings; a missing file yields defaults.
    pub fn load(base_dir: Option<&Path>) -> Result<Self> {
        let path = Self::path(base_dir);
        match fs::read_to_string(&path) {
            Ok(content) => {
                let settings: Settings = toml::from_str(&content)?;
                settings.validate()?;
                tracing::debug!("loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, base_dir: Option<&Path>) -> Result<()> {
        self.validate()?;
        let path = Self::path(base_dir);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        tracing::info!("saved settings to {}", path.display());
        Ok(())
    }

    /// Delete the settings file and return defaults.
    pub fn reset(base_dir: Option<&Path>) -> Result<Self> {
        let path = Self::path(base_dir);
        match fs::remove_file(&path) {
            Ok(()) => tracing::info!("removed {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(Self::default())
    }

    /// Update one field from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "embeddings" => self.embeddings = PathBuf::from(value),
            "candidates" => self.candidates = PathBuf::from(value),
            "input" => self.input = PathBuf::from(value),
            "output" => self.output = PathBuf::from(value),
            "embedding-delimiter" => self.embedding_delimiter = value.to_string(),
            "candidate-delimiter" => self.candidate_delimiter = value.to_string(),
            "top-n" => {
                self.top_n = value
                    .trim()
                    .parse()
                    .map_err(|e| StoreError::Settings(format!("top-n '{value}': {e}")))?;
            }
            "metric" => self.metric = value.parse()?,
            "strategy" => self.strategy = value.parse()?,
            other => {
                return Err(StoreError::Settings(format!(
                    "unknown key '{other}' (expected one of: {})",
                    KEYS.join(", ")
                )));
            }
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.top_n < 1 {
            return Err(StoreError::Settings("top-n must be at least 1".to_string()));
        }
        if self.embedding_delimiter.is_empty() || self.candidate_delimiter.is_empty() {
            return Err(StoreError::Settings("delimiters must not be empty".to_string()));
        }
        Ok(())
    }

    /// Push metric, strategy and N into `engine`.
    pub fn configure(&self, engine: &mut WordReplacer) {
        engine.set_metric(self.metric);
        engine.set_strategy(self.strategy);
        engine.set_top_n(self.top_n);
    }

    /// Load both files named by these settings into `engine`.
    ///
    /// Each store is parsed completely before it replaces the engine's
    /// current one, so a parse failure leaves the engine as it was.
    pub fn load_stores(&self, engine: &mut WordReplacer) -> Result<()> {
        let embeddings = load_embeddings(&self.embeddings, &self.embedding_delimiter)?;
        let candidates = load_candidates(&self.candidates, &self.candidate_delimiter)?;
        engine.set_embeddings(embeddings);
        engine.set_candidates(candidates);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let s = Settings::load(Some(dir.path())).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.embedding_delimiter, ", ");
        assert_eq!(s.top_n, 1);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut s = Settings::default();
        s.set("metric", "euclidean").unwrap();
        s.set("strategy", "biased-most-similar").unwrap();
        s.set("top-n", "5").unwrap();
        s.save(Some(dir.path())).unwrap();

        let loaded = Settings::load(Some(dir.path())).unwrap();
        assert_eq!(loaded, s);
        assert_eq!(loaded.metric, Metric::Euclidean);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "top-n = 3\nmetric = \"dot-product\"\n").unwrap();
        let s = Settings::load(Some(dir.path())).unwrap();
        assert_eq!(s.top_n, 3);
        assert_eq!(s.metric, Metric::DotProduct);
        assert_eq!(s.strategy, Strategy::MostSimilar);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut s = Settings::default();
        assert!(s.set("top-n", "0").is_err());
        assert!(s.set("top-n", "many").is_err());
        assert!(s.set("metric", "manhattan").is_err());
        assert!(s.set("colour", "red").is_err());
    }

    #[test]
    fn test_reset_removes_file() {
        let dir = TempDir::new().unwrap();
        let mut s = Settings::default();
        s.set("top-n", "4").unwrap();
        s.save(Some(dir.path())).unwrap();
        assert!(Settings::path(Some(dir.path())).exists());

        let reset = Settings::reset(Some(dir.path())).unwrap();
        assert_eq!(reset, Settings::default());
        assert!(!Settings::path(Some(dir.path())).exists());
        // Resetting twice is fine.
        Settings::reset(Some(dir.path())).unwrap();
    }

    #[test]
    fn test_configure_engine() {
        let mut s = Settings::default();
        s.set("strategy", "array").unwrap();
        s.set("top-n", "3").unwrap();
        let mut engine = WordReplacer::seeded(0);
        s.configure(&mut engine);
        assert_eq!(engine.strategy(), Strategy::Array);
        assert_eq!(engine.top_n(), 3);
    }

    #[test]
    fn test_failed_load_leaves_engine_untouched() {
        let dir = TempDir::new().unwrap();
        let emb = dir.path().join("emb.txt");
        let cand = dir.path().join("cand.txt");
        fs::write(&emb, "cat, 1, 0\ndog, 0.9, 0.1\n").unwrap();
        fs::write(&cand, "dog\n").unwrap();

        let mut s = Settings::default();
        s.embeddings = emb.clone();
        s.candidates = cand;
        let mut engine = WordReplacer::seeded(0);
        s.load_stores(&mut engine).unwrap();
        assert_eq!(engine.embeddings().len(), 2);

        fs::write(&emb, "cat, 1, 0\ndog, x, 0.1\n").unwrap();
        assert!(matches!(s.load_stores(&mut engine), Err(StoreError::Parse { .. })));
        assert_eq!(engine.embeddings().len(), 2);
        assert_eq!(engine.replace_word("cat"), "dog");
    }
}
