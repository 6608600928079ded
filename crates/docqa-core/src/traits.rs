use crate::error::Result;
use crate::types::{Neighbor, RetrievedChunk};

/// Maps text to fixed-dimension vectors.
///
/// `embed_batch` must preserve order and return exactly one vector per input,
/// all of length `dim()`.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;

    fn embed_one(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()])?;
        if vectors.len() != 1 {
            anyhow::bail!("embedder returned {} vectors for a single input", vectors.len());
        }
        Ok(vectors.remove(0))
    }
}

/// Exact or approximate k-nearest-neighbor lookup over vectors keyed by
/// insertion position.
pub trait SimilarityIndex: Send + Sync {
    fn dim(&self) -> usize;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Up to `k` neighbors ordered by ascending distance, ties by lower position.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>>;
}

/// Turns a question plus ranked context into an answer. Implementations may
/// call out to a generative model; the retrieval pipeline never does.
pub trait AnswerSynthesizer: Send + Sync {
    fn synthesize(&self, question: &str, context: &[RetrievedChunk]) -> anyhow::Result<String>;
}
