use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use docqa_core::traits::{AnswerSynthesizer, Embedder, SimilarityIndex};
use docqa_core::types::{AnswerSource, RetrievedChunk};
use docqa_core::{chunk_text, ChunkingConfig, Error};
use docqa_embed::FakeEmbedder;
use docqa_index::FlatL2Index;
use docqa_retrieve::{answer, build_prompt, retrieve, DocumentIndex, ExtractiveSynthesizer};

/// One dimension per letter A..E, counting occurrences of single-letter tokens.
#[derive(Default)]
struct LetterEmbedder {
    calls: AtomicUsize,
}

impl LetterEmbedder {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn embed(text: &str) -> Vec<f32> {
        let mut v = vec![0.0; 5];
        for token in text.split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_alphanumeric()).to_uppercase();
            if let Some(i) = ["A", "B", "C", "D", "E"].iter().position(|l| *l == token) {
                v[i] += 1.0;
            }
        }
        v
    }
}

impl Embedder for LetterEmbedder {
    fn dim(&self) -> usize {
        5
    }

    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| Self::embed(t)).collect())
    }
}

/// Returns whatever vectors it was configured with, ignoring the input.
struct ScriptedEmbedder {
    batch: Vec<Vec<f32>>,
    query: Vec<f32>,
}

impl Embedder for ScriptedEmbedder {
    fn dim(&self) -> usize {
        self.query.len()
    }

    fn embed_batch(&self, _texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(self.batch.clone())
    }

    fn embed_one(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        Ok(self.query.clone())
    }
}

struct UnavailableEmbedder;

impl Embedder for UnavailableEmbedder {
    fn dim(&self) -> usize {
        3
    }

    fn embed_batch(&self, _texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Err(anyhow!("model unavailable"))
    }
}

const EXAMPLE: &str = "A. B. C. D. E.";

#[test]
fn query_about_a_retrieves_first_window() {
    let embedder = LetterEmbedder::default();
    let config = ChunkingConfig::new(3, 1).unwrap();
    let doc = DocumentIndex::build(EXAMPLE, &embedder, &config).expect("build");
    assert_eq!(doc.chunks().len(), 2);
    assert_eq!(doc.dim(), 5);

    let hits = doc.retrieve(&embedder, "Tell me about A", 2).expect("retrieve");
    assert_eq!(hits[0].position, 0);
    assert_eq!(hits[0].text, "A. B. C.");
    assert_eq!(hits[0].distance, 2.0);
    assert_eq!(hits[1].text, "C. D. E.");
    assert_eq!(hits[1].distance, 4.0);
    // one batch for the chunks, one for the query
    assert_eq!(embedder.calls(), 2);
}

#[test]
fn every_chunk_is_found_at_its_own_position() {
    let text = "Boil water for one minute. Let it cool before drinking. \
                Store it in clean containers. Label each container with a date. \
                Rotate stored water every six months. Keep containers away from sunlight. \
                Check seals for leaks.";
    let embedder = FakeEmbedder::new(4096);
    let config = ChunkingConfig::new(2, 1).unwrap();
    let doc = DocumentIndex::build(text, &embedder, &config).expect("build");
    assert_eq!(doc.index().len(), doc.chunks().len());

    for (i, chunk) in doc.chunks().iter().enumerate() {
        let hits = doc.retrieve(&embedder, &chunk.text, 1).expect("retrieve");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, i);
        assert_eq!(hits[0].text, chunk.text);
        assert!(hits[0].distance.abs() < 1e-6);
    }
}

#[test]
fn k_is_capped_by_chunk_count() {
    let embedder = LetterEmbedder::default();
    let doc = DocumentIndex::build(EXAMPLE, &embedder, &ChunkingConfig::new(3, 1).unwrap()).unwrap();
    let hits = doc.retrieve(&embedder, "E", 100).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].text, "C. D. E.");
}

#[test]
fn empty_document_never_reaches_the_embedder() {
    let embedder = LetterEmbedder::default();
    let err = DocumentIndex::build("  \n ", &embedder, &ChunkingConfig::default()).unwrap_err();
    assert!(matches!(err, Error::NoContent));
    assert!(err.is_recoverable());

    let chunks = chunk_text("", &ChunkingConfig::default()).unwrap();
    let index = FlatL2Index::build(vec![vec![1.0; 5]]).unwrap();
    let err = retrieve("anything", &embedder, &index, &chunks, 3).unwrap_err();
    assert!(matches!(err, Error::NoContent));
    assert_eq!(embedder.calls(), 0);
}

#[test]
fn chunk_and_index_sizes_must_agree() {
    let embedder = LetterEmbedder::default();
    let chunks = chunk_text(EXAMPLE, &ChunkingConfig::new(3, 1).unwrap()).unwrap();
    let index = FlatL2Index::build(vec![vec![0.0; 5]]).unwrap();
    let err = retrieve("A", &embedder, &index, &chunks, 1).unwrap_err();
    assert!(matches!(err, Error::IndexMismatch { chunks: 2, vectors: 1 }), "got {err:?}");
    assert_eq!(embedder.calls(), 0);
}

#[test]
fn zero_k_fails_before_embedding() {
    let embedder = LetterEmbedder::default();
    let doc = DocumentIndex::build(EXAMPLE, &embedder, &ChunkingConfig::new(3, 1).unwrap()).unwrap();
    assert_eq!(embedder.calls(), 1);
    let err = doc.retrieve(&embedder, "A", 0).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)), "got {err:?}");
    assert_eq!(embedder.calls(), 1, "query must not be embedded");
}

#[test]
fn invalid_windowing_fails_before_embedding() {
    let embedder = LetterEmbedder::default();
    let config = docqa_core::ChunkingConfig { max_sentences: 3, overlap: 3 };
    let err = DocumentIndex::build(EXAMPLE, &embedder, &config).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert_eq!(embedder.calls(), 0);
}

#[test]
fn embedder_failures_propagate_unchanged() {
    let err = DocumentIndex::build(EXAMPLE, &UnavailableEmbedder, &ChunkingConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Embedder(_)));
    assert_eq!(err.to_string(), "model unavailable");
    assert!(!err.is_recoverable());
}

#[test]
fn ragged_embeddings_are_rejected() {
    let embedder = ScriptedEmbedder { batch: vec![vec![0.0, 1.0], vec![1.0]], query: vec![0.0, 0.0] };
    let err = DocumentIndex::build(EXAMPLE, &embedder, &ChunkingConfig::new(3, 1).unwrap()).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 2, actual: 1 }), "got {err:?}");
}

#[test]
fn missing_embeddings_are_rejected() {
    let embedder = ScriptedEmbedder { batch: vec![vec![0.0, 1.0]], query: vec![0.0, 0.0] };
    let err = DocumentIndex::build(EXAMPLE, &embedder, &ChunkingConfig::new(3, 1).unwrap()).unwrap_err();
    assert!(matches!(err, Error::EmbeddingCount { expected: 2, actual: 1 }), "got {err:?}");
}

#[test]
fn query_dimension_must_match_index() {
    let chunks = chunk_text(EXAMPLE, &ChunkingConfig::new(3, 1).unwrap()).unwrap();
    let index = FlatL2Index::build(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
    let embedder = ScriptedEmbedder { batch: vec![], query: vec![1.0, 0.0, 0.0] };
    let err = retrieve("A", &embedder, &index, &chunks, 1).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 2, actual: 3 }), "got {err:?}");
}

struct BrokenSynthesizer;

impl AnswerSynthesizer for BrokenSynthesizer {
    fn synthesize(&self, _question: &str, _context: &[RetrievedChunk]) -> anyhow::Result<String> {
        Err(anyhow!("quota exceeded"))
    }
}

fn context() -> Vec<RetrievedChunk> {
    vec![
        RetrievedChunk { position: 1, text: "C. D. E.".into(), distance: 0.5 },
        RetrievedChunk { position: 0, text: "A. B. C.".into(), distance: 1.5 },
    ]
}

#[test]
fn answer_falls_back_to_context() {
    let none = answer("q", context(), None);
    assert_eq!(none.source, AnswerSource::RetrievedOnly);
    assert_eq!(none.text, "C. D. E.\n\nA. B. C.");

    let broken = answer("q", context(), Some(&BrokenSynthesizer));
    assert_eq!(broken.source, AnswerSource::RetrievedOnly);
    assert_eq!(broken.text, none.text);
    assert_eq!(broken.context.len(), 2);

    let generated = answer("q", context(), Some(&ExtractiveSynthesizer));
    assert_eq!(generated.source, AnswerSource::Generated);
    assert_eq!(generated.text, none.text);
}

#[test]
fn prompt_carries_context_in_rank_order_and_question() {
    let prompt = build_prompt("  What comes after D?  ", &context());
    let first = prompt.find("C. D. E.").expect("first chunk");
    let second = prompt.find("A. B. C.").expect("second chunk");
    assert!(first < second);
    assert!(prompt.contains("Question:\nWhat comes after D?\n"));
    assert!(prompt.contains("only the document excerpts"));
}
