use std::fmt;

/// Which load-once resource is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Embeddings,
    Candidates,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Embeddings => write!(f, "word-embedding store"),
            Resource::Candidates => write!(f, "replacement-word set"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Replacement requested before both stores were loaded.
    NotInitialized { missing: Resource },
    /// A metric or strategy name that matches no variant.
    UnknownVariant { kind: &'static str, value: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NotInitialized { missing } => {
                write!(f, "the {missing} has not been initialized")
            }
            EngineError::UnknownVariant { kind, value } => {
                write!(f, "unknown {kind}: '{value}'")
            }
        }
    }
}

impl std::error::Error for EngineError {}

pub type Result<T> = std::result::Result<T, EngineError>;
