use clap::{Args, Parser, Subcommand};

use docqa_core::chunking::ChunkingConfig;
use docqa_core::error::Result;

#[derive(Debug, Parser)]
#[command(name = "docqa", version, about = "Ask questions about a plain-text document")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Preview the document and list the chunks it is split into
    Chunks {
        /// Plain-text document (`~` and `$VAR` are expanded)
        file: String,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Index the document and answer a question, or one question per stdin line
    Ask {
        file: String,
        question: Option<String>,
        /// Number of chunks to retrieve
        #[arg(short, long)]
        k: Option<usize>,
        #[command(flatten)]
        window: WindowArgs,
        /// Show retrieved chunks only, never call a language model
        #[arg(long)]
        no_llm: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct WindowArgs {
    /// Sentences per chunk
    #[arg(long)]
    pub max_sentences: Option<usize>,
    /// Sentences shared by consecutive chunks
    #[arg(long)]
    pub overlap: Option<usize>,
}

impl WindowArgs {
    /// Command-line values over the configured ones, validated.
    pub fn resolve(&self, configured: ChunkingConfig) -> Result<ChunkingConfig> {
        ChunkingConfig::new(
            self.max_sentences.unwrap_or(configured.max_sentences),
            self.overlap.unwrap_or(configured.overlap),
        )
    }
}
