//! The matching scan.
//!
//! Text is processed as a buffer of code points. At every position the
//! longest stored word is located, checked against the exception tries and
//! either masked in place or left alone. The scan then resumes right after
//! the candidate, so each code point is visited a bounded number of times.

use std::ops::Range;

use tracing::trace;

use super::node::Node;
use super::Trie;
use crate::resultset::Resultset;

/// Symbol substituted for every code point of a masked match.
pub const MASK: char = '*';

/// How many code points around a candidate the exception tries may look at.
pub const LOOKAROUND: usize = 4;

/// The pair of whitelist tries consulted while scanning a trie that has
/// exception checking enabled.
#[derive(Debug, Clone, Copy)]
pub struct Exceptions<'a> {
    /// Phrases that exempt a match when they run into its start.
    pub prefix: &'a Trie,
    /// Phrases that exempt a match when they run out of its end.
    pub suffix: &'a Trie,
}

/// Longest stored word starting at `start`, as the position of its last
/// code point.
///
/// Walking stops at a missing edge, at the end of the buffer, or at a leaf,
/// and the furthest terminal seen so far wins.
pub(crate) fn longest_match(root: &Node, chars: &[char], start: usize) -> Option<usize> {
    let mut node = root;
    let mut last = None;
    for (k, &c) in chars.iter().enumerate().skip(start) {
        let Some(next) = node.child(c) else { break };
        node = next;
        if node.is_terminal() {
            last = Some(k);
        }
        if node.is_leaf() {
            break;
        }
    }
    last
}

/// Whether a stored word starting at any position in `starts` ends at or
/// after `min_end`.
///
/// Every start is tried on its own, so adding words can only turn the
/// answer from `false` to `true`.
pub(crate) fn reaches(
    root: &Node,
    chars: &[char],
    mut starts: Range<usize>,
    min_end: usize,
) -> bool {
    starts.any(|s| longest_match(root, chars, s).is_some_and(|e| e >= min_end))
}

impl Exceptions<'_> {
    /// Whether the candidate `[start, end]` of `chars` is whitelisted.
    pub(crate) fn exempts(&self, chars: &[char], start: usize, end: usize) -> bool {
        self.prefix_exempts(chars, start, end) || self.suffix_exempts(chars, end)
    }

    /// An exception phrase beginning in the lookback and reaching at least
    /// the candidate's first code point. The window runs through the
    /// candidate so a phrase may cover the whole match.
    fn prefix_exempts(&self, chars: &[char], start: usize, end: usize) -> bool {
        if start == 0 {
            return false;
        }
        let from = start.saturating_sub(LOOKAROUND);
        let boundary = start - from;
        let hit = self
            .prefix
            .reaches(&chars[from..=end], 0..boundary, boundary);
        if hit {
            trace!(start, end, "candidate exempted by prefix exception");
        }
        hit
    }

    /// An exception phrase beginning on the candidate's last code point and
    /// running into the lookahead.
    fn suffix_exempts(&self, chars: &[char], end: usize) -> bool {
        if end + 1 == chars.len() {
            return false;
        }
        let to = (end + 1 + LOOKAROUND).min(chars.len());
        let hit = self.suffix.reaches(&chars[end..to], 0..1, 1);
        if hit {
            trace!(end, "candidate exempted by suffix exception");
        }
        hit
    }
}

/// Scan `text` against `root`, masking every non-exempted maximal match.
pub(crate) fn scan(root: &Node, text: &str, exceptions: Option<&Exceptions<'_>>) -> Resultset {
    let mut chars: Vec<char> = text.chars().collect();
    let mut found = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let Some(j) = longest_match(root, &chars, i) else {
            i += 1;
            continue;
        };

        let exempt = exceptions.is_some_and(|ex| ex.exempts(&chars, i, j));
        if !exempt {
            found.push(chars[i..=j].iter().collect::<String>());
            chars[i..=j].fill(MASK);
        }
        i = j + 1;
    }

    found.sort();
    Resultset::new(text.to_string(), found, chars.into_iter().collect())
}
