//! Filesystem side of the simplifier: delimited-file loaders, whole-file
//! replacement and persisted settings.

pub mod error;
pub mod loader;
pub mod replace;
pub mod settings;

pub use error::{Result, StoreError};
pub use loader::{load_candidates, load_embeddings, parse_candidates, parse_embeddings};
pub use replace::{replace_file, replace_lines};
pub use settings::{KEYS, Settings, default_base_dir};
