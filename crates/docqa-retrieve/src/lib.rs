//! docqa-retrieve
//!
//! Query-time side of the pipeline: embed the question, search the index and
//! map positions back to chunk text. `DocumentIndex` bundles one document's
//! chunks with their index; `answer` optionally hands the result to a
//! synthesizer.

pub mod answer;
pub mod document;
pub mod retriever;

pub use answer::{answer, build_prompt, join_context, ExtractiveSynthesizer};
pub use document::DocumentIndex;
pub use retriever::retrieve;
