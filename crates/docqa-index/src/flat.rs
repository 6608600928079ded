use std::cmp::Ordering;

use tracing::debug;

use docqa_core::error::{Error, Result};
use docqa_core::traits::SimilarityIndex;
use docqa_core::types::Neighbor;

use crate::distance::squared_l2;

/// Exact nearest-neighbor index: every vector is kept, every query scans all
/// of them. Vectors live in one contiguous buffer in insertion order, so the
/// position of a vector is its 0-based index in the `build` input.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dim: usize,
    data: Vec<f32>,
}

impl FlatL2Index {
    /// Build from vectors that must all share the first vector's dimension.
    ///
    /// Nothing is returned on failure; there is no partially built index.
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dim = vectors.first().map(Vec::len).ok_or(Error::EmptyIndex)?;
        if dim == 0 {
            return Err(Error::Configuration("vectors must have at least one dimension".into()));
        }
        let mut data = Vec::with_capacity(dim * vectors.len());
        for v in &vectors {
            if v.len() != dim {
                return Err(Error::DimensionMismatch { expected: dim, actual: v.len() });
            }
            data.extend_from_slice(v);
        }
        debug!(vectors = vectors.len(), dim, "built flat L2 index");
        Ok(Self { dim, data })
    }

    /// The stored vector at `position`, if any.
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        let start = position.checked_mul(self.dim)?;
        let end = start.checked_add(self.dim)?;
        self.data.get(start..end)
    }

    pub fn vectors(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.dim)
    }
}

/// NaN ranks with +inf, whatever its sign bit, so non-finite vectors never
/// outrank a finite match.
fn rank_key(distance: f32) -> f32 {
    if distance.is_nan() { f32::INFINITY } else { distance }
}

fn by_distance(a: &Neighbor, b: &Neighbor) -> Ordering {
    rank_key(a.distance)
        .total_cmp(&rank_key(b.distance))
        .then_with(|| a.position.cmp(&b.position))
}

impl SimilarityIndex for FlatL2Index {
    fn dim(&self) -> usize {
        self.dim
    }

    fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if k == 0 {
            return Err(Error::Configuration("k must be greater than zero".into()));
        }
        if query.len() != self.dim {
            return Err(Error::DimensionMismatch { expected: self.dim, actual: query.len() });
        }

        let mut hits: Vec<Neighbor> = self
            .vectors()
            .enumerate()
            .map(|(position, v)| Neighbor { position, distance: squared_l2(query, v) })
            .collect();
        if k < hits.len() {
            hits.select_nth_unstable_by(k - 1, by_distance);
            hits.truncate(k);
        }
        // by_distance is a total order, so ties always resolve to the lower position.
        hits.sort_unstable_by(by_distance);
        Ok(hits)
    }
}
