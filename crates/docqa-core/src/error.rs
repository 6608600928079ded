use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Cannot build an index from zero vectors")]
    EmptyIndex,

    #[error("Document produced no content to search")]
    NoContent,

    #[error("Embedder returned {actual} vectors for {expected} inputs")]
    EmbeddingCount { expected: usize, actual: usize },

    #[error("Index holds {vectors} vectors but {chunks} chunks were supplied")]
    IndexMismatch { chunks: usize, vectors: usize },

    #[error(transparent)]
    Embedder(#[from] anyhow::Error),
}

impl Error {
    /// Empty-document conditions the caller can recover from by supplying
    /// another document.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NoContent | Error::EmptyIndex)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
