//! # archtest-core
//!
//! Type model and rule-evaluation engine for architecture tests.
//!
//! - [`TypeRecord`]: one declared type with its module and imports
//! - [`Universe`]: every record of one analysis run, built from a [`SourceOracle`]
//! - [`TypeSet`]: immutable, chainable query cursor with filters and combinators
//! - [`Outcome`]: pass/fail verdict of a chain
//! - [`ArchitecturePattern`]: named rule lists producing [`ValidationResult`]s
//!
//! ## Example
//!
//! ```
//! use archtest_core::{TypeRecord, Universe};
//!
//! let universe = Universe::new(vec![
//!     TypeRecord::builder("User", "shop/domain").struct_like().build(),
//!     TypeRecord::builder("PgRepo", "shop/infrastructure")
//!         .imports(["shop/domain"])
//!         .struct_like()
//!         .build(),
//! ]);
//!
//! let outcome = universe
//!     .that()
//!     .resides_in_namespace("domain")
//!     .should_not()
//!     .have_dependency_on("infrastructure")
//!     .evaluate();
//!
//! assert!(outcome.is_success());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod filter;
mod model;
mod oracle;
mod outcome;
mod pattern;
mod type_set;
mod types;
mod universe;

/// Graphviz rendering.
pub mod graph;
/// Segment-aware path matching.
pub mod matching;
/// Text and HTML rendering.
pub mod report;

pub use config::{AnalyzerConfig, Config, ConfigError};
pub use filter::{Filter, Polarity, Query};
pub use model::{RecordKey, TypeRecord, TypeRecordBuilder};
pub use oracle::{
    CompilationUnit, DeclKind, OracleError, RawDeclaration, SourceOracle, StaticOracle,
};
pub use outcome::{evaluate, Outcome};
pub use pattern::{
    ArchitecturePattern, CustomCheck, PatternError, Rule, RuleCheck, ValidationResult,
};
pub use type_set::{PredicateLog, TypeSet};
pub use types::{CheckReport, ReportEntry, Severity};
pub use universe::Universe;
