use tracing::info;

use docqa_core::chunking::{chunk_text, ChunkingConfig};
use docqa_core::error::{Error, Result};
use docqa_core::traits::{Embedder, SimilarityIndex};
use docqa_core::types::{Chunk, RetrievedChunk};
use docqa_index::FlatL2Index;

use crate::retriever::retrieve;

/// One document, chunked, embedded and indexed. Built once, then only read.
///
/// `chunks[i]` and index position `i` always refer to the same passage.
#[derive(Debug, Clone)]
pub struct DocumentIndex {
    chunks: Vec<Chunk>,
    index: FlatL2Index,
}

impl DocumentIndex {
    /// Chunk `text`, batch-embed every chunk and build the index.
    ///
    /// Text that yields no chunks fails with `NoContent` without calling the
    /// embedder.
    pub fn build(text: &str, embedder: &dyn Embedder, config: &ChunkingConfig) -> Result<Self> {
        let chunks = chunk_text(text, config)?;
        Self::from_chunks(chunks, embedder)
    }

    /// Embed and index already windowed chunks.
    pub fn from_chunks(chunks: Vec<Chunk>, embedder: &dyn Embedder) -> Result<Self> {
        if chunks.is_empty() {
            return Err(Error::NoContent);
        }
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder.embed_batch(&texts)?;
        if vectors.len() != texts.len() {
            return Err(Error::EmbeddingCount { expected: texts.len(), actual: vectors.len() });
        }
        let index = FlatL2Index::build(vectors)?;
        if index.dim() != embedder.dim() {
            return Err(Error::DimensionMismatch { expected: embedder.dim(), actual: index.dim() });
        }
        info!(chunks = chunks.len(), dim = index.dim(), "document indexed");
        Ok(Self { chunks, index })
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn index(&self) -> &FlatL2Index {
        &self.index
    }

    pub fn dim(&self) -> usize {
        self.index.dim()
    }

    pub fn retrieve(&self, embedder: &dyn Embedder, query: &str, k: usize) -> Result<Vec<RetrievedChunk>> {
        retrieve(query, embedder, &self.index, &self.chunks, k)
    }
}
