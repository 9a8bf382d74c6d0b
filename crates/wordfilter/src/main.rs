//! `wordfilter` - CLI for the banned word filter
//!
//! Seeds a registry from configuration and command-line batches, then masks
//! text given as an argument or read from stdin.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use wordfilter::cli::{Cli, Command, ConfigCommand, FilterCommand, QueryCommand};
use wordfilter::config::OutputConfig;
use wordfilter::{init_logging, Config, Registry, Resultset, TrieKind};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // Validation reports on its own target, so it must not fail on the
    // eager load below first.
    if let Some(path) = cli.validation_target() {
        println!("Validating configuration: {}", path.display());
        Config::load_from(Some(path.clone()))
            .with_context(|| format!("invalid configuration: {}", path.display()))?;
        println!("Configuration is valid.");
        return Ok(());
    }

    let config = Config::load_from(cli.config.clone())?;

    if let Command::Config(config_cmd) = &cli.command {
        return handle_config(&config, config_cmd);
    }

    let registry = Registry::from_config(&config.vocabulary)
        .context("failed to seed vocabulary")?;
    let extra = cli.apply_vocabulary(&registry);
    info!(extra, "vocabulary ready");

    match &cli.command {
        Command::Query(query_cmd) => handle_query(&registry, &config.output, query_cmd),
        Command::Filter(filter_cmd) => {
            handle_filter(&registry, &config.output, filter_cmd).context("filter failed")
        }
        Command::Words(words_cmd) => {
            handle_words(&registry, words_cmd.kind.into());
            Ok(())
        }
        Command::Config(_) => Ok(()),
    }
}

fn render(result: &Resultset, output: &OutputConfig, json: bool) -> wordfilter::Result<String> {
    if json || output.json {
        Ok(serde_json::to_string(result)?)
    } else if output.highlight {
        Ok(result.to_html())
    } else {
        Ok(result.to_string())
    }
}

fn handle_query(
    registry: &Registry,
    output: &OutputConfig,
    cmd: &QueryCommand,
) -> anyhow::Result<()> {
    let result = registry.query(&cmd.text);
    let rendered = if cmd.html && !cmd.json {
        result.to_html()
    } else {
        render(&result, output, cmd.json)?
    };
    println!("{rendered}");
    Ok(())
}

fn handle_filter(
    registry: &Registry,
    output: &OutputConfig,
    cmd: &FilterCommand,
) -> wordfilter::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut buf = Vec::new();
    let mut reader = stdin.lock();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Undecodable input is masked on a best-effort basis.
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        let result = registry.query(line);
        writeln!(stdout, "{}", render(&result, output, cmd.json)?)?;
    }
    Ok(())
}

fn handle_words(registry: &Registry, kind: TrieKind) {
    let mut words = registry.trie(kind).read_all();
    words.sort();
    for word in words {
        println!("{word}");
    }
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let vocabulary = &config.vocabulary;
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Vocabulary]");
                println!("  Banned words:       {}", vocabulary.banned.len());
                println!("  Banned file:        {}", display_path(vocabulary.banned_file.as_ref()));
                println!("  Prefix exceptions:  {}", vocabulary.prefix_exceptions.len());
                println!(
                    "  Prefix file:        {}",
                    display_path(vocabulary.prefix_exceptions_file.as_ref())
                );
                println!("  Suffix exceptions:  {}", vocabulary.suffix_exceptions.len());
                println!(
                    "  Suffix file:        {}",
                    display_path(vocabulary.suffix_exceptions_file.as_ref())
                );
                println!();
                println!("[Output]");
                println!("  Highlight:          {}", config.output.highlight);
                println!("  JSON:               {}", config.output.json);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { .. } => {}
    }
    Ok(())
}

fn display_path(path: Option<&std::path::PathBuf>) -> String {
    path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}
