//! Error types for WEAT.

use thiserror::Error;

/// WEAT error types.
///
/// Every variant is fatal to the test invocation that produced it; nothing in
/// the crate retries.
#[derive(Error, Debug)]
pub enum WeatError {
    /// Malformed input detected before any computation started
    #[error("Invalid input: {0}")]
    InputValidation(String),

    /// Word absent from the embedding vocabulary
    #[error("Word not found in embeddings: {word:?}")]
    Lookup { word: String },

    /// Zero spread or non-finite result in the effect size
    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    /// Invalid vector dimensions
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Enumeration aborted before every partition was evaluated
    #[error("Deadline exceeded after {elapsed_ms} ms; {total} partitions were required")]
    DeadlineExceeded { elapsed_ms: u128, total: u128 },

    /// I/O failure while reading vectors, word lists, or configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a vector file
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl WeatError {
    pub(crate) fn lookup(word: &str) -> Self {
        WeatError::Lookup {
            word: word.to_string(),
        }
    }
}

/// Result type alias for WEAT operations.
pub type Result<T> = std::result::Result<T, WeatError>;
