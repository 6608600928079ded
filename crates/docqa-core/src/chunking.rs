use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::segment::segment;
use crate::types::Chunk;

/// Sentence-window parameters. Defaults match five-sentence windows sharing
/// one sentence with their neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub max_sentences: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_sentences: 5, overlap: 1 }
    }
}

impl ChunkingConfig {
    pub fn new(max_sentences: usize, overlap: usize) -> Result<Self> {
        let config = Self { max_sentences, overlap };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_sentences == 0 {
            return Err(Error::Configuration("max_sentences must be greater than zero".into()));
        }
        if self.overlap >= self.max_sentences {
            return Err(Error::Configuration(format!(
                "overlap ({}) must be less than max_sentences ({})",
                self.overlap, self.max_sentences
            )));
        }
        Ok(())
    }

    /// Sentences the cursor advances between consecutive windows.
    pub fn stride(&self) -> usize {
        self.max_sentences - self.overlap
    }

    /// Number of chunks `chunk_sentences` produces for `sentences` sentences.
    pub fn chunk_count(&self, sentences: usize) -> usize {
        if sentences == 0 {
            return 0;
        }
        let stride = self.stride();
        sentences.saturating_sub(self.overlap).div_ceil(stride).max(1)
    }
}

/// Group sentences into overlapping windows of at most `max_sentences`.
///
/// Windows are emitted in document order; each one after the first starts
/// `overlap` sentences before the previous one ended. The last window may be
/// shorter. Invalid configurations are rejected before any window is built.
pub fn chunk_sentences(sentences: &[String], config: &ChunkingConfig) -> Result<Vec<Chunk>> {
    config.validate()?;
    let mut chunks = Vec::with_capacity(config.chunk_count(sentences.len()));
    let mut start = 0;
    while start < sentences.len() {
        let end = (start + config.max_sentences).min(sentences.len());
        let text = sentences[start..end].join(" ");
        if !text.trim().is_empty() {
            chunks.push(Chunk { text, sentences: start..end });
        }
        if end == sentences.len() {
            break;
        }
        start += config.stride();
    }
    debug!(sentences = sentences.len(), chunks = chunks.len(), "windowed sentences");
    Ok(chunks)
}

/// Segment `text` into sentences and window them.
pub fn chunk_text(text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>> {
    config.validate()?;
    chunk_sentences(&segment(text), config)
}
