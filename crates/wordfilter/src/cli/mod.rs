//! Command-line interface for wordfilter.
//!
//! This module provides the CLI structure for the `wordfilter` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, FilterCommand, QueryCommand, TrieKindArg, WordsCommand,
};

use crate::registry::{Registry, TrieKind};

/// wordfilter - Mask banned words in text
///
/// Scans text for banned phrases, masks the longest match at each position
/// with `*`, and skips matches covered by prefix or suffix whitelist phrases.
#[derive(Debug, Parser)]
#[command(name = "wordfilter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Comma-separated banned words added on top of the configuration
    #[arg(long, global = true, value_name = "WORDS")]
    pub ban: Vec<String>,

    /// Comma-separated prefix exceptions added on top of the configuration
    #[arg(long, global = true, value_name = "WORDS")]
    pub allow_prefix: Vec<String>,

    /// Comma-separated suffix exceptions added on top of the configuration
    #[arg(long, global = true, value_name = "WORDS")]
    pub allow_suffix: Vec<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Mask banned words in a single text
    Query(QueryCommand),

    /// Mask banned words in every line read from stdin
    Filter(FilterCommand),

    /// List the words of one vocabulary
    Words(WordsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }

    /// The configuration file `config validate` should check, if that is the
    /// command: `--file`, else `--config`, else the default path.
    #[must_use]
    pub fn validation_target(&self) -> Option<PathBuf> {
        match &self.command {
            Command::Config(ConfigCommand::Validate { file }) => Some(
                file.clone()
                    .or_else(|| self.config.clone())
                    .unwrap_or_else(crate::Config::default_config_path),
            ),
            _ => None,
        }
    }

    /// Apply the `--ban`, `--allow-prefix` and `--allow-suffix` batches.
    ///
    /// Returns the number of processed items.
    pub fn apply_vocabulary(&self, registry: &Registry) -> usize {
        let batches = [
            (TrieKind::Banned, &self.ban),
            (TrieKind::PrefixException, &self.allow_prefix),
            (TrieKind::SuffixException, &self.allow_suffix),
        ];
        batches
            .iter()
            .flat_map(|(kind, list)| list.iter().map(move |batch| (*kind, batch)))
            .map(|(kind, batch)| registry.add_batch(kind, batch))
            .sum()
    }
}
