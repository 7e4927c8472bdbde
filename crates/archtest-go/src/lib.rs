//! # archtest-go
//!
//! Tree-sitter powered [`SourceOracle`](archtest_core::SourceOracle) for Go.
//!
//! - [`LanguageExtractor`] trait for per-file extraction
//! - [`GoExtractor`] for package clause, import, and type extraction
//! - [`GoModule`] for resolving import paths from `go.mod`
//! - [`GoSourceOracle`] for walking a tree into compilation units

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extractor;
pub mod golang;
pub mod module;
pub mod oracle;

pub use extractor::{ExtractError, FileAnalysis, LanguageExtractor};
pub use golang::GoExtractor;
pub use module::GoModule;
pub use oracle::GoSourceOracle;
