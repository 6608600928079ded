//! Domain types shared by the chunker, the index and the retriever.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A window of consecutive sentences that is embedded and retrieved as one unit.
///
/// - `text`: the sentences joined with single spaces
/// - `sentences`: half-open range into the sentence sequence it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub sentences: Range<usize>,
}

impl Chunk {
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }
}

/// One nearest-neighbor match. `position` is the 0-based insertion order of
/// the stored vector; `distance` is squared Euclidean, lower is closer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f32,
}

/// A neighbor resolved back to its chunk text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub position: usize,
    pub text: String,
    pub distance: f32,
}

/// Indicates how an answer was produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnswerSource {
    /// A synthesizer composed the answer from the retrieved context.
    Generated,
    /// No synthesizer was available (or it failed); the answer is the context itself.
    RetrievedOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
    pub context: Vec<RetrievedChunk>,
}
