//! Thread-safe prefix tree of banned or whitelisted phrases.
//!
//! A [`Trie`] wraps a [`Node`] tree in a reader-writer lock. Mutations take
//! the write lock; listing and matching take the read lock. Every operation
//! is total: degenerate input (empty words, absent words, empty text) is a
//! silent no-op rather than an error.
//!
//! # Example
//!
//! ```
//! use wordfilter::Trie;
//!
//! let trie = Trie::new();
//! trie.add("AV");
//! trie.add("AV演员");
//!
//! let result = trie.query("日本AV演员兼电视");
//! assert!(result.exists());
//! assert_eq!(result.text(), "日本****兼电视");
//! ```

mod node;
mod scan;

use std::ops::Range;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

pub use node::Node;
pub use scan::{Exceptions, LOOKAROUND, MASK};

use crate::resultset::Resultset;

/// A prefix tree guarded by its own reader-writer lock.
#[derive(Debug, Default)]
pub struct Trie {
    root: RwLock<Node>,
    check_exceptions: bool,
}

impl Trie {
    /// Create an empty trie that never consults exception tries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty trie whose matches are subject to exception checks
    /// when queried through [`Trie::query_with`].
    #[must_use]
    pub fn with_exceptions() -> Self {
        Self {
            root: RwLock::new(Node::new()),
            check_exceptions: true,
        }
    }

    /// Whether queries on this trie consult exception tries.
    #[must_use]
    pub fn checks_exceptions(&self) -> bool {
        self.check_exceptions
    }

    // A panic elsewhere never leaves the tree half-mutated in a way that
    // breaks its invariants, so poisoned guards are recovered.
    fn read(&self) -> RwLockReadGuard<'_, Node> {
        self.root.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Node> {
        self.root.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `word`. Empty words are ignored; re-adding is harmless.
    pub fn add(&self, word: &str) {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return;
        }
        self.write().insert(&chars);
        debug!(len = chars.len(), "word added");
    }

    /// Remove `word`, pruning every node no other word depends on.
    ///
    /// Removing an empty or absent word is a no-op.
    pub fn delete(&self, word: &str) {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return;
        }
        let pruned = self.write().remove(&chars);
        debug!(len = chars.len(), pruned, "word deleted");
    }

    /// Whether exactly `word` is stored.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        !chars.is_empty() && self.read().contains(&chars)
    }

    /// Every stored word, in no particular order.
    #[must_use]
    pub fn read_all(&self) -> Vec<String> {
        let mut words = Vec::new();
        self.read().collect(&mut String::new(), &mut words);
        words
    }

    /// Whether no word is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_leaf()
    }

    /// Drop every stored word in one step.
    pub fn clear(&self) {
        let old = std::mem::take(&mut *self.write());
        debug!(nodes = old.descendants(), "trie cleared");
    }

    /// Mask every stored word found in `text`, without exception checks.
    ///
    /// A trie built with [`Trie::with_exceptions`] still skips its
    /// whitelists here, since it does not know them; use
    /// [`Trie::query_with`] or [`crate::Registry::query`] instead.
    #[must_use]
    pub fn query(&self, text: &str) -> Resultset {
        if self.check_exceptions {
            debug!("exception checks requested but no exception tries given");
        }
        self.scan(text, None)
    }

    /// Mask every stored word found in `text`, letting `exceptions` exempt
    /// matches if this trie was built with [`Trie::with_exceptions`].
    ///
    /// This trie's read lock is held for the whole scan while the prefix and
    /// suffix tries are locked briefly, one at a time, for each candidate.
    #[must_use]
    pub fn query_with(&self, text: &str, exceptions: &Exceptions<'_>) -> Resultset {
        if !self.check_exceptions {
            return self.scan(text, None);
        }
        if std::ptr::eq(self, exceptions.prefix) || std::ptr::eq(self, exceptions.suffix) {
            warn!("trie used as its own exception list, ignoring exceptions");
            return self.scan(text, None);
        }
        self.scan(text, Some(exceptions))
    }

    fn scan(&self, text: &str, exceptions: Option<&Exceptions<'_>>) -> Resultset {
        let root = self.read();
        let result = scan::scan(&root, text, exceptions);
        debug!(
            chars = result.len(),
            matches = result.words().len(),
            exceptions = exceptions.is_some(),
            "query finished"
        );
        result
    }

    /// Whether a word stored here starts at a position in `starts` of
    /// `chars` and ends at or after `min_end`. Used for exception lookups.
    pub(crate) fn reaches(&self, chars: &[char], starts: Range<usize>, min_end: usize) -> bool {
        scan::reaches(&self.read(), chars, starts, min_end)
    }
}
