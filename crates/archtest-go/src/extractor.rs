//! Language-agnostic extraction types and trait.
//!
//! `LanguageExtractor` is the seam between a Tree-sitter grammar and the
//! oracle: it turns one file's text into a [`FileAnalysis`], which the
//! oracle then places in a module and converts to a compilation unit.

use archtest_core::DeclKind;

/// Package clause extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Package name (e.g., `domain`).
    pub name: String,
}

/// A single imported path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Import path without quotes (e.g., `github.com/acme/shop/internal/domain`).
    pub path: String,
}

/// A top-level type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Type name.
    pub name: String,
    /// Struct, interface, or anything else.
    pub kind: DeclKind,
    /// Methods declared directly in an interface body.
    pub methods: Vec<String>,
}

/// Result of analyzing a single source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAnalysis {
    /// Package clause, if present.
    pub package: Option<PackageInfo>,
    /// Every import, in source order.
    pub imports: Vec<ImportInfo>,
    /// Every top-level type declaration, in source order.
    pub declarations: Vec<DeclInfo>,
}

/// Why a file could not be analyzed.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Parser error detail.
        message: String,
    },

    /// The parser produced no tree.
    #[error("parser returned no syntax tree")]
    Parse,

    /// The source contains a syntax error.
    #[error("syntax error at line {line}")]
    Syntax {
        /// Line of the first error node (1-indexed).
        line: usize,
    },

    /// The file declares no package.
    #[error("missing package clause")]
    MissingPackage,
}

/// Trait for language-specific Tree-sitter extraction.
///
/// Implement this to add support for a new language.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".go"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extracts the package, imports, and type declarations from source code.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or the source does
    /// not parse cleanly.
    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError>;
}
