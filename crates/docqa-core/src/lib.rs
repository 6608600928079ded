#![deny(unused_variables)]
#![deny(unused_imports)]

//! Core of the document question-answering pipeline: sentence segmentation,
//! sentence windowing, the embedder and index seams, shared types and errors.

pub mod chunking;
pub mod config;
pub mod error;
pub mod segment;
pub mod text;
pub mod traits;
pub mod types;

pub use chunking::{chunk_sentences, chunk_text, ChunkingConfig};
pub use error::{Error, Result};
pub use segment::segment;
pub use text::clean_text;
pub use traits::{AnswerSynthesizer, Embedder, SimilarityIndex};
pub use types::{Answer, AnswerSource, Chunk, Neighbor, RetrievedChunk};
