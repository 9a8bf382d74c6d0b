//! Word lists: comma-separated batches and word-list files.
//!
//! A word-list file is UTF-8 text with one word per line, the same layout a
//! `words` listing prints. Blank lines and lines starting with `#` are
//! skipped. Invalid UTF-8 is decoded lossily instead of being rejected.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Separator between words of a batch.
pub const BATCH_SEPARATOR: char = ',';

/// Split a comma-separated batch into words, trimming surrounding spaces.
///
/// Empty items are kept. Applying them is a no-op, but they still count
/// towards the number of processed items.
///
/// ```
/// use wordfilter::vocabulary::split_batch;
///
/// assert_eq!(split_batch("AV, 黄色 ,"), vec!["AV", "黄色", ""]);
/// ```
#[must_use]
pub fn split_batch(batch: &str) -> Vec<&str> {
    batch
        .split(BATCH_SEPARATOR)
        .map(|word| word.trim_matches(' '))
        .collect()
}

/// Parse the contents of a word-list file.
#[must_use]
pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim_matches(|c: char| c == ' ' || c == '\r'))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Read and parse a word-list file.
///
/// # Errors
///
/// Returns [`Error::WordList`] if the file cannot be read.
pub fn load_word_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::word_list(path, source))?;
    let words = parse_word_list(&String::from_utf8_lossy(&bytes));
    debug!(path = %path.display(), count = words.len(), "word list loaded");
    Ok(words)
}
