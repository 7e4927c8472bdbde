//! # archtest-patterns
//!
//! Built-in architecture patterns and declarative rule loading.
//!
//! Every factory validates its namespace parameters up front and returns a
//! [`PatternError`] for unusable input, so a mistyped pattern fails where it
//! is declared rather than when it is validated.
//!
//! | Pattern | Factory | Rules |
//! |---------|---------|-------|
//! | Layered | [`layered`] | one per ordered layer pair |
//! | Clean / Onion | [`clean_architecture`] | 6 |
//! | Hexagonal | [`hexagonal`] | 4 |
//! | MVC | [`mvc`] | 3 |
//! | CQRS | [`cqrs`] | 2, or 6 with read/write models |
//! | Event-sourced CQRS | [`event_sourced_cqrs`] | 2 to 7 |
//! | DDD + Clean | [`ddd_with_clean_architecture`] | 3 per context, pairwise isolation, shared kernel |
//!
//! ## Usage
//!
//! ```
//! use archtest_core::{TypeRecord, Universe};
//! use archtest_patterns::layered;
//!
//! let universe = Universe::new(vec![
//!     TypeRecord::builder("Handler", "app/presentation")
//!         .imports(["app/domain"])
//!         .build(),
//! ]);
//!
//! let pattern = layered(&["domain", "application", "presentation"])?;
//! assert_eq!(pattern.rules().len(), 3);
//! assert!(pattern.validate(&universe).iter().all(|r| r.succeeded));
//! # Ok::<(), archtest_core::PatternError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod clean;
mod cqrs;
mod ddd;
mod hexagonal;
mod layered;
mod mvc;

pub mod declarative;

pub use catalog::{catalog, PatternInfo, PatternKind};
pub use clean::clean_architecture;
pub use cqrs::{cqrs, event_sourced_cqrs, CqrsLayout, EventSourcedLayout};
pub use ddd::ddd_with_clean_architecture;
pub use hexagonal::{hexagonal, PORT_INTERFACE};
pub use layered::layered;
pub use mvc::mvc;

pub use archtest_core::{ArchitecturePattern, PatternError, Rule};

use archtest_core::Query;
use std::collections::HashSet;

/// Maps `(scope, forbidden)` namespace pairs to dependency-ban rules.
fn forbid_all<'a, I>(pairs: I) -> Vec<Rule>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(scope, forbidden)| Rule::from_query(Query::forbid_dependency(scope, forbidden)))
        .collect()
}

/// Rejects an empty (or whitespace-only) namespace parameter.
fn require(pattern: &'static str, role: &'static str, namespace: &str) -> Result<(), PatternError> {
    if namespace.trim().is_empty() {
        return Err(PatternError::EmptyNamespace { pattern, role });
    }
    Ok(())
}

/// Rejects repeated names.
fn require_distinct<S: AsRef<str>>(names: &[S]) -> Result<(), PatternError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_ref()) {
            return Err(PatternError::DuplicateLayer {
                name: name.as_ref().to_owned(),
            });
        }
    }
    Ok(())
}
