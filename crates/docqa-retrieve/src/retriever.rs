use tracing::debug;

use docqa_core::error::{Error, Result};
use docqa_core::traits::{Embedder, SimilarityIndex};
use docqa_core::types::{Chunk, RetrievedChunk};

/// Embed `query`, find its `k` nearest chunk vectors and resolve each hit to
/// its chunk text.
///
/// Position `i` in `index` must be the embedding of `chunks[i]`. Empty `chunks`
/// fails with `NoContent`, a size disagreement with `IndexMismatch` and `k == 0`
/// with `Configuration`, all before the embedder is called.
pub fn retrieve(
    query: &str,
    embedder: &dyn Embedder,
    index: &dyn SimilarityIndex,
    chunks: &[Chunk],
    k: usize,
) -> Result<Vec<RetrievedChunk>> {
    if chunks.is_empty() {
        return Err(Error::NoContent);
    }
    if chunks.len() != index.len() {
        return Err(Error::IndexMismatch { chunks: chunks.len(), vectors: index.len() });
    }
    if k == 0 {
        return Err(Error::Configuration("k must be greater than zero".into()));
    }

    let query_vec = embedder.embed_one(query)?;
    let neighbors = index.search(&query_vec, k)?;
    debug!(k, hits = neighbors.len(), "retrieved neighbors");

    neighbors
        .into_iter()
        .map(|n| {
            let chunk = chunks
                .get(n.position)
                .ok_or(Error::IndexMismatch { chunks: chunks.len(), vectors: index.len() })?;
            Ok(RetrievedChunk { position: n.position, text: chunk.text.clone(), distance: n.distance })
        })
        .collect()
}
