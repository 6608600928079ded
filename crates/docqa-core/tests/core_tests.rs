use std::fs;
use tempfile::TempDir;

use docqa_core::config::{resolve_with_base, Config};
use docqa_core::{chunk_sentences, chunk_text, segment, ChunkingConfig, Error};

fn sentences(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Sentence {i}.")).collect()
}

#[test]
fn segment_example_document() {
    assert_eq!(segment("A. B. C. D. E."), vec!["A.", "B.", "C.", "D.", "E."]);
}

#[test]
fn segment_without_terminal_punctuation_is_one_sentence() {
    assert_eq!(segment("  no punctuation here  "), vec!["no punctuation here"]);
    assert!(segment("").is_empty());
    assert!(segment(" \n\t ").is_empty());
}

#[test]
fn segmentation_is_idempotent() {
    let text = "First point.  Second, with 3.5 units!\nThird?   Trailing fragment";
    let once = segment(text);
    let twice = segment(&once.join(" "));
    assert_eq!(once, twice);
}

#[test]
fn example_windows_advance_by_stride() {
    let config = ChunkingConfig::new(3, 1).expect("valid config");
    let chunks = chunk_text("A. B. C. D. E.", &config).expect("chunk");
    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["A. B. C.", "C. D. E."]);
    assert_eq!(chunks[0].sentences, 0..3);
    assert_eq!(chunks[1].sentences, 2..5);
}

#[test]
fn overlap_equal_to_window_is_rejected() {
    let err = chunk_sentences(&sentences(5), &ChunkingConfig { max_sentences: 3, overlap: 3 }).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)), "got {err:?}");
    let err = chunk_sentences(&sentences(5), &ChunkingConfig { max_sentences: 0, overlap: 0 }).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)), "got {err:?}");
    assert!(ChunkingConfig::new(2, 5).is_err());
}

#[test]
fn empty_text_produces_no_chunks() {
    let chunks = chunk_text("   ", &ChunkingConfig::default()).expect("chunk");
    assert!(chunks.is_empty());
}

#[test]
fn windows_cover_every_sentence_and_share_overlap() {
    for n in 1..=12 {
        let input = sentences(n);
        for max_sentences in 1..=6 {
            for overlap in 0..max_sentences {
                let config = ChunkingConfig { max_sentences, overlap };
                let chunks = chunk_sentences(&input, &config).expect("chunk");

                assert_eq!(chunks.len(), config.chunk_count(n), "n={n} m={max_sentences} o={overlap}");

                let mut covered = vec![false; n];
                for chunk in &chunks {
                    assert!(!chunk.text.is_empty());
                    assert!(chunk.sentence_count() <= max_sentences);
                    assert_eq!(chunk.text, input[chunk.sentences.clone()].join(" "));
                    for i in chunk.sentences.clone() {
                        covered[i] = true;
                    }
                }
                assert!(covered.iter().all(|c| *c), "n={n} m={max_sentences} o={overlap}");

                for pair in chunks.windows(2) {
                    let (prev, next) = (&pair[0], &pair[1]);
                    assert!(prev.sentences.start < next.sentences.start, "document order");
                    assert_eq!(prev.sentences.end - next.sentences.start, overlap);
                    let tail = &input[prev.sentences.end - overlap..prev.sentences.end];
                    let head = &input[next.sentences.start..next.sentences.start + overlap];
                    assert_eq!(tail, head);
                }
            }
        }
    }
}

#[test]
fn config_merges_env_file_over_base() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[chunking]\nmax_sentences = 4\noverlap = 1\n\n[retrieval]\ntop_k = 5\n",
    )
    .unwrap();
    fs::write(tmp.path().join("config.test.toml"), "[chunking]\noverlap = 2\n").unwrap();

    let config = Config::load_for_env(tmp.path(), "test").expect("load");
    let settings = config.settings().expect("settings");
    assert_eq!(settings.chunking, ChunkingConfig { max_sentences: 4, overlap: 2 });
    assert_eq!(settings.retrieval.top_k, 5);
    assert_eq!(settings.embedding.max_len, 256, "unset sections fall back to defaults");
    assert_eq!(config.get::<usize>("chunking.max_sentences").unwrap(), 4);
}

#[test]
fn config_rejects_invalid_windowing() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[chunking]\nmax_sentences = 2\noverlap = 2\n").unwrap();
    let err = Config::load_for_env(tmp.path(), "dev").err().expect("invalid overlap");
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn config_rejects_fake_embeddings_in_production() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[embedding]\nuse_fake = true\n").unwrap();
    assert!(Config::load_for_env(tmp.path(), "prod").is_err());
    assert!(Config::load_for_env(tmp.path(), "dev").is_ok());
}

#[test]
fn relative_model_dir_resolves_against_config_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[embedding]\nmodel_dir = \"models/mini\"\n").unwrap();
    let config = Config::load_for_env(tmp.path(), "dev").expect("load");
    assert_eq!(config.base(), tmp.path());
    let model_dir = config.settings().unwrap().embedding.model_dir.expect("configured");
    assert_eq!(std::path::PathBuf::from(model_dir), tmp.path().join("models/mini"));

    let absolute = tmp.path().join("elsewhere");
    let absolute = absolute.to_str().unwrap();
    assert_eq!(resolve_with_base(tmp.path(), absolute), std::path::PathBuf::from(absolute));
}
