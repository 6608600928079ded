//! `docqa` command-line front end: load a plain-text document, window it into
//! chunks, index it once and answer questions against it.

pub mod cli;
pub mod logging;
pub mod synth;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use docqa_core::clean_text;

pub use synth::{parse_completion, OpenAiSynthesizer};

/// Read a text file (lossy on invalid UTF-8) and normalize its whitespace.
pub fn load_document(path: &Path) -> Result<String> {
    let raw = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            String::from_utf8_lossy(&bytes).to_string()
        }
    };
    Ok(clean_text(&raw))
}

/// The first `max_chars` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
