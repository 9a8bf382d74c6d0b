//! Trie vertex and the structural operations on it.
//!
//! Every child is exclusively owned by its parent, so the tree can be
//! mutated through plain `&mut` recursion without reference counting.

use std::collections::HashMap;

/// A single trie vertex.
///
/// Edges are labeled by one code point. `terminal` marks that a stored word
/// ends at this node; a terminal node may still have children when the word
/// is a prefix of a longer stored word.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Node {
    children: HashMap<char, Node>,
    terminal: bool,
}

impl Node {
    /// Create an empty, non-terminal node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stored word ends here.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Whether this node has no outgoing edges.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Follow the edge labeled `c`.
    #[must_use]
    pub fn child(&self, c: char) -> Option<&Node> {
        self.children.get(&c)
    }

    /// Insert the path spelled by `chars` below this node and mark its end.
    ///
    /// Called on the root with a non-empty slice; an empty slice would mark
    /// the receiver itself.
    pub(crate) fn insert(&mut self, chars: &[char]) {
        let mut node = self;
        for &c in chars {
            node = node.children.entry(c).or_default();
        }
        node.terminal = true;
    }

    /// Remove the word spelled by `chars` below this node.
    ///
    /// Returns `true` when the child edge for `chars[0]` was detached, which
    /// tells the caller that this node may itself have become prunable.
    /// The pruning decision is taken on the way back up, after the deeper
    /// levels have reported.
    pub(crate) fn remove(&mut self, chars: &[char]) -> bool {
        let Some((&c, rest)) = chars.split_first() else {
            return false;
        };
        let Some(child) = self.children.get_mut(&c) else {
            return false;
        };

        if rest.is_empty() {
            if !child.terminal {
                return false;
            }
            if child.is_leaf() {
                self.children.remove(&c);
                return true;
            }
            // Still a prefix of longer words: degrade to a plain path node.
            child.terminal = false;
            return false;
        }

        if child.remove(rest) && child.is_leaf() && !child.terminal {
            self.children.remove(&c);
            return true;
        }
        false
    }

    /// Whether the exact path `chars` ends on a terminal node.
    #[must_use]
    pub fn contains(&self, chars: &[char]) -> bool {
        let mut node = self;
        for c in chars {
            match node.children.get(c) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.terminal
    }

    /// Collect every word stored below this node, each prefixed by `prefix`.
    pub(crate) fn collect(&self, prefix: &mut String, words: &mut Vec<String>) {
        for (&c, child) in &self.children {
            prefix.push(c);
            if child.terminal {
                words.push(prefix.clone());
            }
            child.collect(prefix, words);
            prefix.pop();
        }
    }

    /// Number of nodes below this one, excluding itself.
    #[must_use]
    pub fn descendants(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.descendants())
            .sum()
    }
}
