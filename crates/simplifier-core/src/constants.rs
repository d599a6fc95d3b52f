/// Number of similar words stored per embedding unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 1;

/// Field separator for word-embedding files: `word, 0.1, 0.2, ...`
pub const DEFAULT_EMBEDDING_DELIMITER: &str = ", ";

/// Field separator for replacement-word files.
pub const DEFAULT_CANDIDATE_DELIMITER: &str = ",";
