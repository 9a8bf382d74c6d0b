//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::registry::TrieKind;

/// Query command arguments.
#[derive(Debug, Args)]
pub struct QueryCommand {
    /// The text to scan
    pub text: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Print the raw text with matches highlighted as HTML
    #[arg(long)]
    pub html: bool,
}

/// Filter command arguments.
#[derive(Debug, Args)]
pub struct FilterCommand {
    /// Output one JSON result per line
    #[arg(short, long)]
    pub json: bool,
}

/// Words command arguments.
#[derive(Debug, Args)]
pub struct WordsCommand {
    /// Which word list to print
    #[arg(short, long, value_enum, default_value = "banned")]
    pub kind: TrieKindArg,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Word list selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrieKindArg {
    /// Banned words
    Banned,
    /// Prefix exceptions
    Prefix,
    /// Suffix exceptions
    Suffix,
}

impl From<TrieKindArg> for TrieKind {
    fn from(arg: TrieKindArg) -> Self {
        match arg {
            TrieKindArg::Banned => Self::Banned,
            TrieKindArg::Prefix => Self::PrefixException,
            TrieKindArg::Suffix => Self::SuffixException,
        }
    }
}
