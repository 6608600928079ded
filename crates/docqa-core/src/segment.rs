//! Sentence segmentation.
//!
//! A sentence ends at `.`, `!` or `?` when the next character is whitespace.
//! The terminal punctuation stays with its sentence; the whitespace run that
//! follows is dropped.

use std::sync::LazyLock;

use regex::Regex;

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"[.!?]\s+") {
    Ok(re) => re,
    Err(err) => panic!("sentence regex is invalid: {err}"),
});

fn push_trimmed(out: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        out.push(fragment.to_string());
    }
}

/// Split `text` into trimmed, non-empty sentences in document order.
///
/// Text without terminal punctuation comes back as a single sentence; empty or
/// whitespace-only text yields no sentences.
pub fn segment(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for end in SENTENCE_END.find_iter(text) {
        // terminal punctuation is one byte
        push_trimmed(&mut sentences, &text[start..end.start() + 1]);
        start = end.end();
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}
