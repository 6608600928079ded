use std::sync::LazyLock;

use regex::Regex;

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"\n{2,}") {
    Ok(re) => re,
    Err(err) => panic!("newline regex is invalid: {err}"),
});

static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"[ \t]{2,}") {
    Ok(re) => re,
    Err(err) => panic!("blank regex is invalid: {err}"),
});

/// Normalize extracted document text before segmentation.
///
/// - `\r\n` becomes `\n`
/// - runs of newlines collapse to one newline
/// - runs of two or more spaces/tabs collapse to one space
/// - leading and trailing whitespace is removed
pub fn clean_text(raw: &str) -> String {
    let raw = raw.replace("\r\n", "\n");
    let raw = NEWLINE_RUNS.replace_all(&raw, "\n");
    BLANK_RUNS.replace_all(&raw, " ").trim().to_string()
}
