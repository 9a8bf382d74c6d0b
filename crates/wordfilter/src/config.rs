//! Configuration management for wordfilter.
//!
//! Configuration is loaded with figment from defaults, an optional TOML file
//! and `WORDFILTER_` environment variables. It only describes how to seed the
//! vocabulary at startup and how results are printed; nothing is ever
//! written back.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vocabulary::BATCH_SEPARATOR;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "wordfilter";

/// Prefix of environment variables overriding configuration values.
const ENV_PREFIX: &str = "WORDFILTER_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `WORDFILTER_`, sections split on `__`)
/// 2. TOML config file at `~/.config/wordfilter/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial vocabulary.
    pub vocabulary: VocabularyConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Words loaded into the registry at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Banned words.
    pub banned: Vec<String>,
    /// File with additional banned words, one per line.
    pub banned_file: Option<PathBuf>,
    /// Whitelist phrases checked in front of a match.
    pub prefix_exceptions: Vec<String>,
    /// File with additional prefix exceptions.
    pub prefix_exceptions_file: Option<PathBuf>,
    /// Whitelist phrases checked behind a match.
    pub suffix_exceptions: Vec<String>,
    /// File with additional suffix exceptions.
    pub suffix_exceptions_file: Option<PathBuf>,
}

/// How query results are printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print highlighted HTML instead of masked text.
    pub highlight: bool,
    /// Print results as JSON.
    pub json: bool,
}

impl VocabularyConfig {
    fn inline_lists(&self) -> [(&'static str, &[String]); 3] {
        [
            ("banned", &self.banned),
            ("prefix_exceptions", &self.prefix_exceptions),
            ("suffix_exceptions", &self.suffix_exceptions),
        ]
    }

    fn files(&self) -> [(&'static str, Option<&Path>); 3] {
        [
            ("banned_file", self.banned_file.as_deref()),
            ("prefix_exceptions_file", self.prefix_exceptions_file.as_deref()),
            ("suffix_exceptions_file", self.suffix_exceptions_file.as_deref()),
        ]
    }
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and environment apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an inline word contains the batch separator or a
    /// configured word-list file does not exist.
    pub fn validate(&self) -> Result<()> {
        for (list, words) in self.vocabulary.inline_lists() {
            if let Some(word) = words.iter().find(|w| w.contains(BATCH_SEPARATOR)) {
                return Err(Error::config_validation(format!(
                    "{list} entry {word:?} contains the batch separator '{BATCH_SEPARATOR}'"
                )));
            }
        }

        for (key, path) in self.vocabulary.files() {
            if let Some(path) = path {
                if !path.is_file() {
                    return Err(Error::config_validation(format!(
                        "{key} {} does not exist",
                        path.display()
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.vocabulary.banned.is_empty());
        assert!(config.vocabulary.banned_file.is_none());
        assert!(!config.output.highlight);
        assert!(!config.output.json);
    }

    #[test]
    fn test_validate_valid_config() {
        let mut config = Config::default();
        config.vocabulary.banned = vec!["AV".to_string(), "黄色".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_separator_in_word() {
        let mut config = Config::default();
        config.vocabulary.prefix_exceptions = vec!["不,黄色".to_string()];

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("prefix_exceptions"));
        assert!(err.contains("separator"));
    }

    #[test]
    fn test_validate_missing_file() {
        let mut config = Config::default();
        config.vocabulary.suffix_exceptions_file =
            Some(PathBuf::from("/nonexistent/wordfilter/suffix.txt"));

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("suffix_exceptions_file"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("wordfilter"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "wordfilter-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[vocabulary]\nbanned = [\"AV\", \"黄色\"]\nprefix_exceptions = [\"不黄色\"]\n\n[output]\njson = true\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.vocabulary.banned, vec!["AV", "黄色"]);
        assert_eq!(config.vocabulary.prefix_exceptions, vec!["不黄色"]);
        assert!(config.output.json);
        assert!(!config.output.highlight);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("vocabulary"));
        assert!(json.contains("suffix_exceptions_file"));
    }

    #[test]
    fn test_output_config_deserialize() {
        let json = r#"{"highlight": true}"#;
        let output: OutputConfig = serde_json::from_str(json).unwrap();
        assert!(output.highlight);
        assert!(!output.json);
    }
}
