//! Run-level configuration read from `archtest.toml`.
//!
//! Only the `[analyzer]` table and `fail_on` live here. The `[[patterns]]`
//! and `[[rules]]` arrays are read from the same file by the pattern crate.

use crate::types::Severity;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Lowest severity that fails a run (default: error).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Source discovery settings.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

impl Config {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Effective failure threshold.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or_default()
    }
}

/// Source discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Directory to analyze, relative to the config file (default: `.`).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns of files to skip.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether `_test.go` files contribute types.
    #[serde(default = "default_true")]
    pub include_tests: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            include_tests: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/vendor/**".to_string(), "**/testdata/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("Failed to read config file {}: {source}", path.display())]
    #[diagnostic(code(archtest::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Invalid TOML or schema mismatch.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(archtest::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },
}
