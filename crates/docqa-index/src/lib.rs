//! docqa-index
//!
//! In-memory similarity index over chunk embeddings. `FlatL2Index` is an exact
//! brute-force scan; it implements `SimilarityIndex` so an approximate
//! structure can stand in for it without touching the retriever.

pub mod distance;
pub mod flat;

pub use distance::squared_l2;
pub use flat::FlatL2Index;
