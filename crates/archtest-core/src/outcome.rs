//! Evaluation of a [`TypeSet`] chain into a pass/fail [`Outcome`].

use crate::model::{RecordKey, TypeRecord};
use crate::type_set::TypeSet;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Result of evaluating one rule chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the rule holds.
    pub succeeded: bool,
    /// Offending records, empty on success.
    pub violating_records: Vec<TypeRecord>,
}

impl Outcome {
    /// A passing outcome.
    #[must_use]
    pub fn success() -> Self {
        Self {
            succeeded: true,
            violating_records: Vec::new(),
        }
    }

    /// A failing outcome with the given offenders (possibly none).
    #[must_use]
    pub fn failure(violating_records: Vec<TypeRecord>) -> Self {
        Self {
            succeeded: false,
            violating_records,
        }
    }

    /// Returns true if the rule holds.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.succeeded
    }

    /// Human-readable listing of the violations.
    ///
    /// ```
    /// use archtest_core::{Outcome, TypeRecord};
    ///
    /// let outcome = Outcome::failure(vec![TypeRecord::builder("User", "app/domain").build()]);
    /// assert_eq!(
    ///     outcome.failure_details(),
    ///     "Found 1 failing type(s):\n1. User in package app/domain\n"
    /// );
    /// assert_eq!(Outcome::success().failure_details(), "No failures detected");
    /// ```
    #[must_use]
    pub fn failure_details(&self) -> String {
        if self.succeeded {
            return "No failures detected".to_owned();
        }
        if self.violating_records.is_empty() {
            return "Rule failed without offending types".to_owned();
        }
        let mut out = format!(
            "Found {} failing type(s):\n",
            self.violating_records.len()
        );
        for (i, record) in self.violating_records.iter().enumerate() {
            out.push_str(&format!("{}. {record}\n", i + 1));
        }
        out
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.succeeded {
            f.write_str("PASSED")
        } else {
            write!(f, "FAILED ({} violation(s))", self.violating_records.len())
        }
    }
}

/// Decides pass/fail for a chain.
///
/// - No filter or union applied: vacuous pass.
/// - Negated chain (`should_not` seen): passes iff no record remains; the
///   remaining records are the violations.
/// - Otherwise: passes iff at least one record remains; on failure the
///   violations are the checkpoint records that did not survive.
#[must_use]
pub fn evaluate(set: &TypeSet) -> Outcome {
    if !set.has_assertions() {
        return Outcome::success();
    }
    if set.is_negated() {
        return if set.is_empty() {
            Outcome::success()
        } else {
            Outcome::failure(set.records())
        };
    }
    if !set.is_empty() {
        return Outcome::success();
    }
    let surviving: HashSet<RecordKey<'_>> = set.iter().map(TypeRecord::key).collect();
    Outcome::failure(
        set.baseline_records()
            .filter(|r| !surviving.contains(&r.key()))
            .cloned()
            .collect(),
    )
}
