use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use docqa_cli::cli::{Cli, Command};
use docqa_cli::{load_document, logging, preview, OpenAiSynthesizer};
use docqa_core::config::{expand_path, Config};
use docqa_core::traits::{AnswerSynthesizer, Embedder};
use docqa_core::types::{Answer, AnswerSource};
use docqa_core::{chunk_text, Error};
use docqa_embed::get_default_embedder;
use docqa_retrieve::{answer, DocumentIndex};

const PREVIEW_CHARS: usize = 1200;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.settings()?;
    logging::init(&settings.logging.level);
    debug!(
        env = config.env_name(),
        max_sentences = settings.chunking.max_sentences,
        overlap = settings.chunking.overlap,
        top_k = settings.retrieval.top_k,
        "configuration loaded"
    );

    match cli.command {
        Command::Chunks { file, window } => {
            let path = expand_path(&file);
            let text = load_document(&path)?;
            let chunking = window.resolve(settings.chunking)?;
            println!("📄 {}", path.display());
            println!("\nPreview of extracted text:\n{}", preview(&text, PREVIEW_CHARS));
            let chunks = chunk_text(&text, &chunking)?;
            println!("\n📌 Total chunks created: {}", chunks.len());
            for (i, chunk) in chunks.iter().enumerate() {
                println!(
                    "\n--- Chunk {} (sentences {}-{}) ---\n{}",
                    i + 1,
                    chunk.sentences.start + 1,
                    chunk.sentences.end,
                    chunk.text
                );
            }
        }
        Command::Ask { file, question, k, window, no_llm } => {
            let path = expand_path(&file);
            let text = load_document(&path)?;
            let chunking = window.resolve(settings.chunking)?;
            let k = k.unwrap_or(settings.retrieval.top_k);
            if k == 0 {
                return Err(Error::Configuration("k must be greater than zero".into()).into());
            }

            let chunks = chunk_text(&text, &chunking)?;
            if chunks.is_empty() {
                println!("⚠️  No text found in {}. Try another document.", path.display());
                return Ok(());
            }

            let embedder = get_default_embedder(&settings.embedding)?;
            let doc = build_index(chunks, embedder.as_ref())?;
            let synthesizer = if no_llm { None } else { OpenAiSynthesizer::from_settings(&settings.synthesis)? };
            let synthesizer = synthesizer.as_ref().map(|s| s as &dyn AnswerSynthesizer);

            match question {
                Some(q) => ask(&doc, embedder.as_ref(), synthesizer, &q, k)?,
                None => {
                    print!("Ask a question about the document (one per line): ");
                    io::stdout().flush()?;
                    for line in io::stdin().lock().lines() {
                        let line = line?;
                        if line.trim().is_empty() {
                            continue;
                        }
                        ask(&doc, embedder.as_ref(), synthesizer, &line, k)?;
                        print!("\n> ");
                        io::stdout().flush()?;
                    }
                }
            }
        }
    }
    Ok(())
}

fn build_index(chunks: Vec<docqa_core::Chunk>, embedder: &dyn Embedder) -> Result<DocumentIndex> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(format!("Embedding {} chunks...", chunks.len()));
    let doc = DocumentIndex::from_chunks(chunks, embedder);
    match &doc {
        Ok(doc) => pb.finish_with_message(format!("✅ Index built ({} chunks)", doc.chunks().len())),
        Err(_) => pb.abandon_with_message("❌ Indexing failed"),
    }
    Ok(doc?)
}

fn ask(
    doc: &DocumentIndex,
    embedder: &dyn Embedder,
    synthesizer: Option<&dyn AnswerSynthesizer>,
    question: &str,
    k: usize,
) -> Result<()> {
    let hits = doc.retrieve(embedder, question, k)?;
    let result = answer(question, hits, synthesizer);
    print_answer(&result, synthesizer.is_some());
    Ok(())
}

fn print_answer(result: &Answer, had_synthesizer: bool) {
    match result.source {
        AnswerSource::Generated => println!("\n✅ Answer (LLM):"),
        AnswerSource::RetrievedOnly if had_synthesizer => {
            println!("\n⚠️  Language model unavailable, showing retrieved chunks only:")
        }
        AnswerSource::RetrievedOnly => println!("\n✅ Answer (retrieved chunks only):"),
    }
    println!("{}", result.text);

    println!("\n📝 Retrieved context:");
    for (rank, hit) in result.context.iter().enumerate() {
        println!("  {}. chunk {}  distance={:.4}", rank + 1, hit.position + 1, hit.distance);
        println!("     {}", hit.text);
    }
}
