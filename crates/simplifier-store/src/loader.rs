use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use simplifier_core::{CandidateSet, EmbeddingStore};

use crate::error::{Result, StoreError};

// ---------------------------------------------------------------------------
// Line parsing (no I/O, fully unit-testable)
// ---------------------------------------------------------------------------

/// Split a line on `delimiter`, dropping trailing empty fields so that a
/// line ending in the delimiter parses like one that doesn't.
fn split_fields<'a>(line: &'a str, delimiter: &str) -> Vec<&'a str> {
    let mut fields: Vec<&str> = line.split(delimiter).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Parse `word<d>x1<d>x2...` into the word and its vector.
fn parse_embedding_line(line: &str, delimiter: &str) -> std::result::Result<(String, Vec<f64>), String> {
    let fields = split_fields(line, delimiter);
    let Some((word, components)) = fields.split_first() else {
        return Err("empty entry".to_string());
    };
    let vector = components
        .iter()
        .enumerate()
        .map(|(i, c)| {
            c.trim()
                .parse::<f64>()
                .map_err(|e| format!("component {} of '{word}' is not a number ('{c}'): {e}", i + 1))
        })
        .collect::<std::result::Result<Vec<f64>, String>>()?;
    Ok((word.to_string(), vector))
}

/// Parse a word-embedding listing. Blank lines are skipped. Every entry
/// must have the same dimension as the first.
pub fn parse_embeddings(
    reader: impl BufRead,
    delimiter: &str,
    source: &Path,
) -> Result<EmbeddingStore> {
    let parse_error = |line: usize, message: String| StoreError::Parse {
        path: source.to_path_buf(),
        line,
        message,
    };

    let mut entries = Vec::new();
    let mut dimension = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let (word, vector) =
            parse_embedding_line(&line, delimiter).map_err(|m| parse_error(line_no, m))?;
        let expected = *dimension.get_or_insert(vector.len());
        if vector.len() != expected {
            return Err(parse_error(
                line_no,
                format!(
                    "'{word}' has {} components, expected {expected}",
                    vector.len()
                ),
            ));
        }
        entries.push((word, vector));
    }

    Ok(entries.into_iter().collect())
}

/// Parse a replacement-word listing: every delimited token on every line
/// joins the set verbatim. Empty tokens are ignored.
pub fn parse_candidates(reader: impl BufRead, delimiter: &str) -> Result<CandidateSet> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        words.extend(
            line.split(delimiter)
                .filter(|w| !w.is_empty())
                .map(str::to_string),
        );
    }
    Ok(words.into_iter().collect())
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

pub fn load_embeddings(path: &Path, delimiter: &str) -> Result<EmbeddingStore> {
    let file = File::open(path)?;
    let store = parse_embeddings(BufReader::new(file), delimiter, path)?;
    tracing::info!(
        "loaded {} embeddings (dimension {}) from {}",
        store.len(),
        store.dimension(),
        path.display()
    );
    Ok(store)
}

pub fn load_candidates(path: &Path, delimiter: &str) -> Result<CandidateSet> {
    let file = File::open(path)?;
    let set = parse_candidates(BufReader::new(file), delimiter)?;
    tracing::info!("loaded {} replacement words from {}", set.len(), path.display());
    Ok(set)
}
