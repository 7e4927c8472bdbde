//! Architecture patterns: named, ordered rule lists validated against a universe.

use crate::filter::Query;
use crate::model::TypeRecord;
use crate::outcome::Outcome;
use crate::universe::Universe;

use miette::Diagnostic;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Caller-supplied rule body.
pub type CustomCheck = Arc<dyn Fn(&Universe) -> Outcome + Send + Sync>;

/// What a rule evaluates.
#[derive(Clone)]
pub enum RuleCheck {
    /// A `that(..).should[_not](..)` query.
    Query(Query),
    /// Fails (with no offenders) when no type resides in the namespace.
    NamespaceNotEmpty(String),
    /// Arbitrary logic over the universe.
    Custom(CustomCheck),
}

impl RuleCheck {
    /// Evaluates against a fresh cursor of `universe`.
    #[must_use]
    pub fn run(&self, universe: &Universe) -> Outcome {
        match self {
            Self::Query(query) => query.run(universe),
            Self::NamespaceNotEmpty(ns) => {
                if universe.that().resides_in_namespace(ns).is_empty() {
                    Outcome::failure(Vec::new())
                } else {
                    Outcome::success()
                }
            }
            Self::Custom(check) => check(universe),
        }
    }
}

impl fmt::Debug for RuleCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(q) => f.debug_tuple("Query").field(q).finish(),
            Self::NamespaceNotEmpty(ns) => f.debug_tuple("NamespaceNotEmpty").field(ns).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One named rule of a pattern.
#[derive(Debug, Clone)]
pub struct Rule {
    description: String,
    check: RuleCheck,
}

impl Rule {
    /// Creates a rule.
    #[must_use]
    pub fn new(description: impl Into<String>, check: RuleCheck) -> Self {
        Self {
            description: description.into(),
            check,
        }
    }

    /// A rule described by its query.
    #[must_use]
    pub fn from_query(query: Query) -> Self {
        Self::new(query.to_string(), RuleCheck::Query(query))
    }

    /// A rule backed by a closure.
    #[must_use]
    pub fn custom<F>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Universe) -> Outcome + Send + Sync + 'static,
    {
        Self::new(description, RuleCheck::Custom(Arc::new(check)))
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The rule body.
    #[must_use]
    pub fn check(&self) -> &RuleCheck {
        &self.check
    }

    /// Evaluates the rule.
    #[must_use]
    pub fn evaluate(&self, universe: &Universe) -> Outcome {
        self.check.run(universe)
    }
}

/// One rule outcome inside a pattern validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Owning pattern name.
    pub pattern_name: String,
    /// Zero-based position of the rule in the pattern.
    pub rule_index: usize,
    /// Rule description.
    pub rule_description: String,
    /// Whether the rule holds.
    pub succeeded: bool,
    /// Offending records.
    pub violating_records: Vec<TypeRecord>,
}

impl ValidationResult {
    fn new(pattern_name: &str, rule_index: usize, rule: &Rule, outcome: Outcome) -> Self {
        Self {
            pattern_name: pattern_name.to_owned(),
            rule_index,
            rule_description: rule.description.clone(),
            succeeded: outcome.succeeded,
            violating_records: outcome.violating_records,
        }
    }

    /// Returns true if the rule holds.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.succeeded
    }

    /// The bare outcome.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome {
            succeeded: self.succeeded,
            violating_records: self.violating_records.clone(),
        }
    }
}

/// A named, ordered list of rules.
#[derive(Debug, Clone)]
pub struct ArchitecturePattern {
    name: String,
    rules: Vec<Rule>,
}

impl ArchitecturePattern {
    /// Creates a pattern with the given rules.
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Pattern name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs every rule on a fresh cursor of `universe`, in order.
    #[must_use]
    pub fn validate(&self, universe: &Universe) -> Vec<ValidationResult> {
        let results: Vec<ValidationResult> = self
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule)| self.run_rule(i, rule, universe))
            .collect();
        self.log_summary(&results);
        results
    }

    /// Like [`validate`](Self::validate), with rules spread over the rayon pool.
    ///
    /// Results keep declaration order.
    #[must_use]
    pub fn validate_parallel(&self, universe: &Universe) -> Vec<ValidationResult> {
        let results: Vec<ValidationResult> = self
            .rules
            .par_iter()
            .enumerate()
            .map(|(i, rule)| self.run_rule(i, rule, universe))
            .collect();
        self.log_summary(&results);
        results
    }

    fn run_rule(&self, index: usize, rule: &Rule, universe: &Universe) -> ValidationResult {
        let outcome = rule.evaluate(universe);
        debug!(
            "{} rule #{}: {} -> {outcome}",
            self.name,
            index + 1,
            rule.description
        );
        ValidationResult::new(&self.name, index, rule, outcome)
    }

    fn log_summary(&self, results: &[ValidationResult]) {
        let passed = results.iter().filter(|r| r.succeeded).count();
        info!("{}: {passed}/{} rule(s) passed", self.name, results.len());
    }
}

/// Invalid pattern parameters, reported at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum PatternError {
    /// Layered pattern with fewer than two layers.
    #[error("layered architecture needs at least two layers, got {count}")]
    #[diagnostic(
        code(archtest::pattern::too_few_layers),
        help("list the layers from outermost to innermost, e.g. [\"presentation\", \"application\", \"domain\"]")
    )]
    TooFewLayers {
        /// Layers supplied.
        count: usize,
    },

    /// A required namespace parameter was empty.
    #[error("{pattern}: the {role} namespace must not be empty")]
    #[diagnostic(code(archtest::pattern::empty_namespace))]
    EmptyNamespace {
        /// Pattern being built.
        pattern: &'static str,
        /// Parameter name.
        role: &'static str,
    },

    /// DDD pattern without any bounded context.
    #[error("DDD architecture needs at least one bounded context")]
    #[diagnostic(code(archtest::pattern::no_bounded_contexts))]
    NoBoundedContexts,

    /// The same layer or context listed twice.
    #[error("'{name}' is listed more than once")]
    #[diagnostic(code(archtest::pattern::duplicate))]
    DuplicateLayer {
        /// Repeated name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;

    fn universe() -> Universe {
        Universe::new(vec![
            TypeRecord::builder("User", "app/domain").struct_like().build(),
            TypeRecord::builder("Handler", "app/presentation")
                .imports(["app/domain", "app/infrastructure"])
                .struct_like()
                .build(),
            TypeRecord::builder("Db", "app/infrastructure").struct_like().build(),
        ])
    }

    fn pattern() -> ArchitecturePattern {
        ArchitecturePattern::new(
            "Demo",
            vec![
                Rule::from_query(Query::forbid_dependency("domain", "infrastructure")),
                Rule::from_query(Query::forbid_dependency("presentation", "infrastructure")),
                Rule::new("domain is populated", RuleCheck::NamespaceNotEmpty("domain".into())),
                Rule::new("ports exist", RuleCheck::NamespaceNotEmpty("ports".into())),
            ],
        )
        .with_rule(Rule::custom("at most three types", |u| {
            if u.len() <= 3 {
                Outcome::success()
            } else {
                Outcome::failure(u.records().to_vec())
            }
        }))
    }

    #[test]
    fn validate_keeps_rule_order_and_metadata() {
        let results = pattern().validate(&universe());
        let verdicts: Vec<bool> = results.iter().map(|r| r.succeeded).collect();
        assert_eq!(verdicts, [true, false, true, false, true]);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.rule_index, i);
            assert_eq!(r.pattern_name, "Demo");
        }
        assert_eq!(results[1].violating_records[0].name(), "Handler");
        assert!(results[3].violating_records.is_empty());
        assert_eq!(results[4].rule_description, "at most three types");
    }

    #[test]
    fn rules_do_not_see_each_others_filters() {
        let u = universe();
        let p = ArchitecturePattern::new(
            "Isolation",
            vec![
                Rule::from_query(Query::should(
                    vec![Filter::ResidesInNamespace("domain".into())],
                    vec![Filter::BeStruct],
                )),
                Rule::from_query(Query::should(
                    vec![Filter::ResidesInNamespace("infrastructure".into())],
                    vec![Filter::BeStruct],
                )),
            ],
        );
        assert!(p.validate(&u).iter().all(ValidationResult::is_success));
    }

    #[test]
    fn parallel_matches_sequential() {
        let u = universe();
        let p = pattern();
        assert_eq!(p.validate(&u), p.validate_parallel(&u));
    }

    #[test]
    fn pattern_error_messages() {
        assert_eq!(
            PatternError::TooFewLayers { count: 1 }.to_string(),
            "layered architecture needs at least two layers, got 1"
        );
        assert_eq!(
            PatternError::EmptyNamespace {
                pattern: "MVC",
                role: "view"
            }
            .to_string(),
            "MVC: the view namespace must not be empty"
        );
    }
}
