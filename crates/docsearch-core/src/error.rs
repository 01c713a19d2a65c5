use std::path::PathBuf;
use thiserror::Error;

/// Corpus source could not be turned into a generation.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Corpus source not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Index construction or lookup failed an invariant.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Embedding dimension mismatch: expected {expected}, got {actual} (document {index})")]
    DimensionMismatch { expected: usize, actual: usize, index: usize },

    #[error("Embedder returned {actual} vectors for {expected} texts")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Query vector has {actual} dims, index has {expected}")]
    QueryDimension { expected: usize, actual: usize },

    #[error("Embedder returned an empty vector")]
    EmptyVector,

    #[error("Embedding failed: {0}")]
    Embedding(String),
}

/// A query could not be answered.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Query must not be empty")]
    EmptyQuery,

    #[error("top_k must be greater than zero")]
    InvalidTopK,

    #[error("Strategy {strategy} unavailable: {reason}")]
    StrategyUnavailable { strategy: crate::types::Strategy, reason: String },
}

impl SearchError {
    /// True for caller mistakes, false for service conditions.
    pub fn is_input_error(&self) -> bool {
        matches!(self, SearchError::EmptyQuery | SearchError::InvalidTopK)
    }
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;
