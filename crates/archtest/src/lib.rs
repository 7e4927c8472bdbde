//! # archtest
//!
//! Architecture tests for Go codebases.
//!
//! This is the main facade crate that re-exports the engine, the pattern
//! library, the Go source oracle, and the `check!()` macro.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! archtest = "0.3"
//! ```
//!
//! ```rust,ignore
//! // tests/architecture.rs
//! archtest::check!();
//! ```
//!
//! This validates every `[[patterns]]` and `[[rules]]` entry of
//! `archtest.toml` as part of `cargo test`.
//!
//! ## Programmatic Usage
//!
//! ```rust,no_run
//! use archtest::patterns::clean_architecture;
//!
//! let universe = archtest::in_path("./service");
//!
//! let outcome = universe
//!     .that()
//!     .resides_in_namespace("internal/domain")
//!     .should_not()
//!     .have_dependency_on("internal/infrastructure")
//!     .evaluate();
//! assert!(outcome.is_success(), "{}", outcome.failure_details());
//!
//! let pattern = clean_architecture(
//!     "internal/domain",
//!     "internal/application",
//!     "internal/infrastructure",
//!     "internal/presentation",
//! )?;
//! for result in pattern.validate(&universe) {
//!     assert!(result.is_success(), "{}", result.rule_description);
//! }
//! # Ok::<(), archtest::PatternError>(())
//! ```

#![forbid(unsafe_code)]

use std::path::Path;

// Re-export core types
pub use archtest_core::*;

// Re-export the check macro for archtest::check!()
pub use archtest_macros::check;

/// Built-in architecture patterns and declarative config loading.
pub mod patterns {
    pub use archtest_patterns::*;
}

/// Go source oracle.
pub mod go {
    pub use archtest_go::*;
}

mod runner;

/// Builds the universe of every Go type declared under `root`.
///
/// A missing or unreadable root yields an empty universe.
#[must_use]
pub fn in_path(root: impl AsRef<Path>) -> Universe {
    Universe::build(&archtest_go::GoSourceOracle::new(), root.as_ref())
}

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::run_check;
}
