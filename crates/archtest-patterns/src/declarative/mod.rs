//! Patterns and rules declared in `archtest.toml`.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! config_dto types
//!   ↓ validate + convert (loader)
//! Vec<ConfiguredPattern>
//! ```
//!
//! # Example
//!
//! ```toml
//! [[patterns]]
//! kind = "clean"
//! domain = "internal/domain"
//! application = "internal/application"
//! infrastructure = "internal/infrastructure"
//! presentation = "internal/presentation"
//!
//! [[rules]]
//! name = "handlers-stay-thin"
//! severity = "warning"
//! that = { resides_in_namespace = "presentation" }
//! should_not = { have_dependency_on = "database/sql" }
//! ```

use archtest_core::{ArchitecturePattern, Severity};
use miette::Diagnostic;
use std::path::{Path, PathBuf};

pub mod config_dto;
pub mod loader;

/// A pattern together with the severity its failures are reported at.
#[derive(Debug, Clone)]
pub struct ConfiguredPattern {
    /// The pattern.
    pub pattern: ArchitecturePattern,
    /// Severity of its failing rules.
    pub severity: Severity,
}

/// Errors from reading TOML and building patterns.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LoadPatternsError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(archtest::config::io))]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(archtest::config::toml))]
    Toml(#[from] toml::de::Error),

    /// Validation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] loader::LoadError),
}

/// Parses TOML content and builds every declared pattern and rule.
///
/// Returns `Ok(vec![])` if no `[[patterns]]` or `[[rules]]` are present.
///
/// # Errors
///
/// Returns an error if TOML parsing or validation fails.
pub fn load_patterns_from_toml(content: &str) -> Result<Vec<ConfiguredPattern>, LoadPatternsError> {
    let dto: config_dto::ArchConfigDto = toml::from_str(content)?;
    let loaded = loader::load(dto)?;
    tracing::debug!("loaded {} configured pattern(s)", loaded.len());
    Ok(loaded)
}

/// Reads `path` and delegates to [`load_patterns_from_toml`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_patterns_from_file(path: &Path) -> Result<Vec<ConfiguredPattern>, LoadPatternsError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadPatternsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_patterns_from_toml(&content)
}
