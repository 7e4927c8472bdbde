//! Boundary with the source-language front end.
//!
//! A [`SourceOracle`] turns a directory into [`CompilationUnit`]s. The core
//! never parses source itself; language crates implement this trait.

use std::path::{Path, PathBuf};

/// Classification of a raw type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Concrete struct-like declaration.
    Struct,
    /// Interface/protocol-like declaration.
    Interface,
    /// Anything the extractor does not classify (aliases, named func types, ...).
    Other,
}

/// A type declaration as reported by the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDeclaration {
    /// Declared identifier.
    pub name: String,
    /// Declaration kind.
    pub kind: DeclKind,
    /// Methods declared directly on an interface body. Empty for other kinds.
    pub interface_methods: Vec<String>,
    /// Line number (1-indexed), 0 when unknown.
    pub line: usize,
}

impl RawDeclaration {
    /// Creates a declaration with no methods and unknown line.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            interface_methods: Vec::new(),
            line: 0,
        }
    }

    /// Sets the directly declared interface methods.
    #[must_use]
    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interface_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the declaration line.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// One source file (or equivalent unit) with its module identity and imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Short module name (e.g. the Go package clause).
    pub module_name: String,
    /// Full hierarchical module path.
    pub module_path: String,
    /// Source file path, relative to the analyzed root when possible.
    pub file: PathBuf,
    /// Module paths imported by this unit.
    pub imports: Vec<String>,
    /// Type declarations found in this unit.
    pub declarations: Vec<RawDeclaration>,
}

/// Errors an oracle may report for a whole load.
///
/// The model builder recovers from all of them by producing an empty universe.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The root path does not exist.
    #[error("source root not found: {}", path.display())]
    MissingRoot {
        /// Requested root.
        path: PathBuf,
    },

    /// IO failure while loading the tree.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failed.
    #[error("failed to walk {}: {message}", path.display())]
    Walk {
        /// Root being walked.
        path: PathBuf,
        /// Walker error detail.
        message: String,
    },
}

/// Loads compilation units for a directory tree.
pub trait SourceOracle: Send + Sync {
    /// Language identifier (e.g. `"go"`).
    fn language_id(&self) -> &'static str;

    /// Loads every compilation unit reachable from `root`, recursively.
    ///
    /// # Errors
    ///
    /// Returns an error when the tree cannot be loaded at all.
    fn load(&self, root: &Path) -> Result<Vec<CompilationUnit>, OracleError>;
}

/// An oracle over units already held in memory. Ignores the root path.
#[derive(Debug, Clone, Default)]
pub struct StaticOracle {
    units: Vec<CompilationUnit>,
}

impl StaticOracle {
    /// Wraps a fixed list of units.
    #[must_use]
    pub fn new(units: Vec<CompilationUnit>) -> Self {
        Self { units }
    }
}

impl SourceOracle for StaticOracle {
    fn language_id(&self) -> &'static str {
        "static"
    }

    fn load(&self, _root: &Path) -> Result<Vec<CompilationUnit>, OracleError> {
        Ok(self.units.clone())
    }
}
