//! Outcome of a single query.

use std::fmt;

use serde::Serialize;

/// Opening tag wrapped around highlighted words.
const HIGHLIGHT_OPEN: &str = "<span style='background:yellow;' contenteditable='true'>";

/// Closing tag wrapped around highlighted words.
const HIGHLIGHT_CLOSE: &str = "</span>";

/// The result of scanning one text.
///
/// `words` is sorted and keeps one entry per masked occurrence, so a word
/// found three times appears three times. `text` has exactly as many code
/// points as `raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resultset {
    raw: String,
    exists: bool,
    words: Vec<String>,
    text: String,
}

impl Resultset {
    pub(crate) fn new(raw: String, words: Vec<String>, text: String) -> Self {
        Self {
            raw,
            exists: !words.is_empty(),
            words,
            text,
        }
    }

    /// The text as it was queried.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether at least one match was masked.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Masked words, sorted, duplicates preserved.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The text with every masked match replaced by `*`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in code points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.chars().count()
    }

    /// Whether the queried text was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Masked words with adjacent duplicates and empty entries removed.
    ///
    /// `words` itself is left untouched.
    #[must_use]
    pub fn distinct_words(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .words
            .iter()
            .map(String::as_str)
            .filter(|w| !w.is_empty())
            .collect();
        out.dedup();
        out
    }

    /// Render the raw text with every matched word wrapped in a highlight
    /// `<span>`.
    ///
    /// Substitution is textual: any occurrence of a matched word is
    /// highlighted, including occurrences that were not themselves masked
    /// (for example because an exception applied there). Words are swapped
    /// for `{index}` placeholders in reverse list order, so a longer word
    /// sorting after its own prefix is replaced before that prefix. The raw
    /// text is not HTML-escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = self.raw.clone();
        for (index, word) in self.words.iter().enumerate().rev() {
            if word.is_empty() {
                continue;
            }
            html = html.replace(word.as_str(), &placeholder(index));
        }
        for (index, word) in self.words.iter().enumerate() {
            let wrapped = format!("{HIGHLIGHT_OPEN}{word}{HIGHLIGHT_CLOSE}");
            html = html.replace(&placeholder(index), &wrapped);
        }
        html
    }
}

fn placeholder(index: usize) -> String {
    format!("{{{index}}}")
}

impl fmt::Display for Resultset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
