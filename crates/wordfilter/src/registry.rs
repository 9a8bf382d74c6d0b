//! The three tries a filtering process works with.
//!
//! A [`Registry`] owns the banned-word trie and the two exception tries it
//! consults. Callers normally build one at startup and pass it around; for
//! processes that prefer a single shared instance, [`init_registry`] creates
//! one lazily and returns the same reference on every call.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::VocabularyConfig;
use crate::error::Result;
use crate::resultset::Resultset;
use crate::trie::{Exceptions, Trie};
use crate::vocabulary::{load_word_list, split_batch};

static GLOBAL: OnceCell<Registry> = OnceCell::new();

/// Return the process-wide registry, creating it empty on first use.
pub fn init_registry() -> &'static Registry {
    GLOBAL.get_or_init(|| {
        info!("process-wide registry initialized");
        Registry::new()
    })
}

/// Names the tries held by a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrieKind {
    /// Words to mask.
    Banned,
    /// Whitelist phrases running into the start of a match.
    PrefixException,
    /// Whitelist phrases running out of the end of a match.
    SuffixException,
}

impl std::fmt::Display for TrieKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Banned => write!(f, "banned"),
            Self::PrefixException => write!(f, "prefix_exception"),
            Self::SuffixException => write!(f, "suffix_exception"),
        }
    }
}

/// Banned words plus their prefix and suffix whitelists.
///
/// Each trie has its own lock. A query on the banned trie locks it first and
/// then the prefix and suffix tries in turn, never the other way round.
#[derive(Debug)]
pub struct Registry {
    banned: Trie,
    prefix_exceptions: Trie,
    suffix_exceptions: Trie,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a registry with three empty tries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banned: Trie::with_exceptions(),
            prefix_exceptions: Trie::new(),
            suffix_exceptions: Trie::new(),
        }
    }

    /// Create a registry seeded from inline words and word-list files.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured word-list file cannot be read.
    pub fn from_config(config: &VocabularyConfig) -> Result<Self> {
        let registry = Self::new();
        let sources = [
            (TrieKind::Banned, &config.banned, &config.banned_file),
            (
                TrieKind::PrefixException,
                &config.prefix_exceptions,
                &config.prefix_exceptions_file,
            ),
            (
                TrieKind::SuffixException,
                &config.suffix_exceptions,
                &config.suffix_exceptions_file,
            ),
        ];

        for (kind, words, file) in sources {
            let trie = registry.trie(kind);
            words.iter().for_each(|word| trie.add(word));
            if let Some(path) = file {
                load_word_list(path)?.iter().for_each(|word| trie.add(word));
            }
            debug!(%kind, "vocabulary seeded");
        }

        Ok(registry)
    }

    /// The banned-word trie.
    ///
    /// Querying it directly with [`Trie::query`] masks every match, whitelisted
    /// or not; use [`Registry::query`] to apply both exception tries.
    #[must_use]
    pub fn banned(&self) -> &Trie {
        &self.banned
    }

    /// The prefix exception trie.
    #[must_use]
    pub fn prefix_exceptions(&self) -> &Trie {
        &self.prefix_exceptions
    }

    /// The suffix exception trie.
    #[must_use]
    pub fn suffix_exceptions(&self) -> &Trie {
        &self.suffix_exceptions
    }

    /// The trie named by `kind`.
    #[must_use]
    pub fn trie(&self, kind: TrieKind) -> &Trie {
        match kind {
            TrieKind::Banned => &self.banned,
            TrieKind::PrefixException => &self.prefix_exceptions,
            TrieKind::SuffixException => &self.suffix_exceptions,
        }
    }

    /// The exception tries, as consulted by [`Registry::query`].
    #[must_use]
    pub fn exceptions(&self) -> Exceptions<'_> {
        Exceptions {
            prefix: &self.prefix_exceptions,
            suffix: &self.suffix_exceptions,
        }
    }

    /// Mask banned words in `text`, honoring both whitelists.
    #[must_use]
    pub fn query(&self, text: &str) -> Resultset {
        self.banned.query_with(text, &self.exceptions())
    }

    /// Empty the prefix exception trie.
    pub fn reset_prefix_exceptions(&self) {
        self.prefix_exceptions.clear();
        info!("prefix exceptions reset");
    }

    /// Empty the suffix exception trie.
    pub fn reset_suffix_exceptions(&self) {
        self.suffix_exceptions.clear();
        info!("suffix exceptions reset");
    }

    /// Add every word of a comma-separated batch to the trie named by `kind`.
    ///
    /// Each word is added under its own lock, so concurrent readers may see
    /// the batch partially applied. Returns the number of items processed,
    /// empty ones included.
    pub fn add_batch(&self, kind: TrieKind, batch: &str) -> usize {
        let trie = self.trie(kind);
        let words = split_batch(batch);
        words.iter().for_each(|word| trie.add(word));
        debug!(%kind, count = words.len(), "batch added");
        words.len()
    }

    /// Delete every word of a comma-separated batch from the trie named by
    /// `kind`. Same locking and counting as [`Registry::add_batch`].
    pub fn delete_batch(&self, kind: TrieKind, batch: &str) -> usize {
        let trie = self.trie(kind);
        let words = split_batch(batch);
        words.iter().for_each(|word| trie.delete(word));
        debug!(%kind, count = words.len(), "batch deleted");
        words.len()
    }

    /// Replace the contents of an exception trie with `batch`.
    ///
    /// The reset happens first and the words are added one by one
    /// afterwards, so readers may briefly see a partial whitelist. The banned
    /// trie is never reset; reloading it only adds the batch.
    pub fn reload(&self, kind: TrieKind, batch: &str) -> usize {
        match kind {
            TrieKind::PrefixException => self.reset_prefix_exceptions(),
            TrieKind::SuffixException => self.reset_suffix_exceptions(),
            TrieKind::Banned => {}
        }
        self.add_batch(kind, batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut words: Vec<String>) -> Vec<String> {
        words.sort();
        words
    }

    #[test]
    fn test_banned_trie_alone_ignores_exceptions() {
        let registry = Registry::new();
        registry.banned().add("黄色");
        registry.prefix_exceptions().add("不黄色");

        assert!(registry.banned().query("他说这不黄色").exists());
        assert!(!registry.query("他说这不黄色").exists());
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = Registry::new();

        assert!(registry.banned().is_empty());
        assert!(registry.prefix_exceptions().is_empty());
        assert!(registry.suffix_exceptions().is_empty());
        assert!(registry.banned().checks_exceptions());
        assert!(!registry.prefix_exceptions().checks_exceptions());
    }

    #[test]
    fn test_trie_by_kind() {
        let registry = Registry::new();
        registry.trie(TrieKind::SuffixException).add("交通");

        assert!(registry.suffix_exceptions().contains("交通"));
        assert!(!registry.prefix_exceptions().contains("交通"));
    }

    #[test]
    fn test_query_uses_exceptions() {
        let registry = Registry::new();
        registry.banned().add("黄色");
        registry.prefix_exceptions().add("不黄色");

        assert!(!registry.query("他说这不黄色").exists());

        let result = registry.query("这是黄色");
        assert!(result.exists());
        assert_eq!(result.text(), "这是**");
    }

    #[test]
    fn test_reset_prefix_exceptions() {
        let registry = Registry::new();
        registry.banned().add("黄色");
        registry.prefix_exceptions().add("不黄色");
        registry.reset_prefix_exceptions();

        assert!(registry.prefix_exceptions().is_empty());
        assert!(registry.query("他说这不黄色").exists());
    }

    #[test]
    fn test_reset_suffix_exceptions() {
        let registry = Registry::new();
        registry.suffix_exceptions().add("交通");
        registry.reset_suffix_exceptions();

        assert!(registry.suffix_exceptions().read_all().is_empty());
    }

    #[test]
    fn test_add_batch_counts_every_item() {
        let registry = Registry::new();
        let count = registry.add_batch(TrieKind::Banned, "AV, AV演员,,日本AV女优 ");

        assert_eq!(count, 4);
        assert_eq!(
            sorted(registry.banned().read_all()),
            vec!["AV", "AV演员", "日本AV女优"]
        );
    }

    #[test]
    fn test_delete_batch() {
        let registry = Registry::new();
        registry.add_batch(TrieKind::Banned, "AV,AV演员,日本AV女优");
        let count = registry.delete_batch(TrieKind::Banned, "AV , 不存在");

        assert_eq!(count, 2);
        assert_eq!(
            sorted(registry.banned().read_all()),
            vec!["AV演员", "日本AV女优"]
        );
    }

    #[test]
    fn test_reload_exception_trie() {
        let registry = Registry::new();
        registry.add_batch(TrieKind::PrefixException, "不黄色,路口");
        registry.reload(TrieKind::PrefixException, "黄色的");

        assert_eq!(registry.prefix_exceptions().read_all(), vec!["黄色的"]);
    }

    #[test]
    fn test_reload_banned_only_adds() {
        let registry = Registry::new();
        registry.banned().add("AV");
        registry.reload(TrieKind::Banned, "黄色");

        assert_eq!(sorted(registry.banned().read_all()), vec!["AV", "黄色"]);
    }

    #[test]
    fn test_from_config_inline_words() {
        let config = VocabularyConfig {
            banned: vec!["黄色".to_string()],
            suffix_exceptions: vec!["交通".to_string()],
            ..Default::default()
        };
        let registry = Registry::from_config(&config).unwrap();

        assert!(registry.banned().contains("黄色"));
        assert!(registry.suffix_exceptions().contains("交通"));
        assert!(registry.prefix_exceptions().is_empty());
    }

    #[test]
    fn test_from_config_word_list_file() {
        let path = std::env::temp_dir().join(format!(
            "wordfilter-registry-{}.txt",
            std::process::id()
        ));
        std::fs::write(&path, "AV\nAV演员\n").unwrap();
        let config = VocabularyConfig {
            banned: vec!["黄色".to_string()],
            banned_file: Some(path.clone()),
            ..Default::default()
        };

        let registry = Registry::from_config(&config);
        std::fs::remove_file(&path).unwrap();

        let registry = registry.unwrap();
        assert_eq!(
            sorted(registry.banned().read_all()),
            vec!["AV", "AV演员", "黄色"]
        );
    }

    #[test]
    fn test_from_config_missing_file() {
        let config = VocabularyConfig {
            prefix_exceptions_file: Some("/nonexistent/prefix.txt".into()),
            ..Default::default()
        };

        assert!(Registry::from_config(&config).is_err());
    }

    #[test]
    fn test_init_registry_is_idempotent() {
        let first = init_registry();
        let second = init_registry();

        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_trie_kind_display() {
        assert_eq!(TrieKind::Banned.to_string(), "banned");
        assert_eq!(TrieKind::PrefixException.to_string(), "prefix_exception");
        assert_eq!(TrieKind::SuffixException.to_string(), "suffix_exception");
    }
}
