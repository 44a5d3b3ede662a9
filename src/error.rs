//! Error types for fuzzy_trie

use thiserror::Error;

/// Result type alias for fuzzy_trie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fuzzy_trie operations
///
/// Broken tree invariants are not represented here: they indicate a bug in
/// the trie itself and panic instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Config error: {0}")]
    Config(String),
}
