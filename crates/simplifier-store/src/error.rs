use std::fmt;
use std::path::PathBuf;

use simplifier_core::EngineError;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    /// A file line that does not have the expected shape.
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    Settings(String),
    Engine(EngineError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Parse {
                path,
                line,
                message,
            } => write!(f, "{}:{line}: {message}", path.display()),
            StoreError::Settings(msg) => write!(f, "invalid settings: {msg}"),
            StoreError::Engine(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<EngineError> for StoreError {
    fn from(e: EngineError) -> Self {
        StoreError::Engine(e)
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(e: toml::de::Error) -> Self {
        StoreError::Settings(e.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(e: toml::ser::Error) -> Self {
        StoreError::Settings(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
