//! `wordfilter` - Detect and mask banned words in free text
//!
//! Words live in thread-safe prefix trees that can be changed while queries
//! run. A query masks the longest banned phrase at each position with `*`,
//! unless a prefix or suffix whitelist phrase touching the match exempts it.
//!
//! # Example
//!
//! ```
//! use wordfilter::Registry;
//!
//! let registry = Registry::new();
//! registry.banned().add("黄色");
//! registry.prefix_exceptions().add("不黄色");
//!
//! assert!(!registry.query("他说这不黄色").exists());
//! assert_eq!(registry.query("这是黄色").text(), "这是**");
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod resultset;
pub mod trie;
pub mod vocabulary;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use registry::{init_registry, Registry, TrieKind};
pub use resultset::Resultset;
pub use trie::{Exceptions, Trie, MASK};
