//! Chainable query cursor over the records of a [`Universe`](crate::Universe).
//!
//! Every operation borrows the receiver and returns a new [`TypeSet`]; the
//! record arena is shared and never written after construction. A single
//! cursor can therefore start several independent chains:
//!
//! ```
//! use archtest_core::{TypeRecord, Universe};
//!
//! let universe = Universe::new(vec![
//!     TypeRecord::builder("User", "app/domain").struct_like().build(),
//!     TypeRecord::builder("Repo", "app/infrastructure")
//!         .imports(["app/domain"])
//!         .struct_like()
//!         .build(),
//! ]);
//!
//! let base = universe.that();
//! let domain = base.resides_in_namespace("domain");
//! let dependents = base.have_dependency_on("app/domain");
//!
//! assert_eq!(domain.len(), 1);
//! assert_eq!(dependents.len(), 1);
//! assert_eq!(base.len(), 2);
//! ```

use crate::matching::{any_import_matches, segment_match};
use crate::model::{RecordKey, TypeRecord};
use crate::outcome::{self, Outcome};

use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// One entry in the ordered log of operations applied to a chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PredicateLog {
    /// A narrowing predicate, by name.
    Filter(String),
    /// A narrowing predicate applied under `not()`: its complement was kept.
    NegatedFilter(String),
    /// `and()` connector. Filters nothing.
    And,
    /// `or()` union.
    Or,
    /// `should()` checkpoint.
    Should,
    /// `should_not()` checkpoint; the negation sentinel.
    Negation,
    /// `not()` marker preceding a negated filter.
    Not,
}

impl PredicateLog {
    /// Whether this entry constrains the result (filters or unions).
    #[must_use]
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::Filter(_) | Self::NegatedFilter(_) | Self::Or)
    }
}

impl fmt::Display for PredicateLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(name) => f.write_str(name),
            Self::NegatedFilter(name) => write!(f, "Not{name}"),
            Self::And => f.write_str("And"),
            Self::Or => f.write_str("Or"),
            Self::Should => f.write_str("Should"),
            Self::Negation => f.write_str("Negate"),
            Self::Not => f.write_str("Not"),
        }
    }
}

/// A filtered view over a shared record arena plus the bookkeeping needed
/// to evaluate it.
#[derive(Clone)]
pub struct TypeSet {
    arena: Arc<[TypeRecord]>,
    current: Vec<usize>,
    baseline: Vec<usize>,
    log: Vec<PredicateLog>,
    negate_next: bool,
}

impl TypeSet {
    pub(crate) fn new(arena: Arc<[TypeRecord]>) -> Self {
        let all: Vec<usize> = (0..arena.len()).collect();
        Self {
            arena,
            current: all.clone(),
            baseline: all,
            log: Vec::new(),
            negate_next: false,
        }
    }

    /// Starts a chain. Applies nothing and logs nothing.
    #[must_use]
    pub fn that(&self) -> Self {
        self.clone()
    }

    // ── Filters ──

    /// Keeps records whose module path segment-matches `namespace`.
    #[must_use]
    pub fn resides_in_namespace(&self, namespace: &str) -> Self {
        self.filter("ResideInNamespace", |r| {
            segment_match(r.module_path(), namespace)
        })
    }

    /// Keeps records whose module path does not segment-match `namespace`.
    #[must_use]
    pub fn do_not_reside_in_namespace(&self, namespace: &str) -> Self {
        self.filter("DoNotResideInNamespace", |r| {
            !segment_match(r.module_path(), namespace)
        })
    }

    /// Keeps records whose module path contains `directory` as a plain substring.
    #[must_use]
    pub fn resides_in_directory(&self, directory: &str) -> Self {
        self.filter("ResideInDirectory", |r| r.module_path().contains(directory))
    }

    /// Keeps records with at least one import segment-matching `dependency`.
    #[must_use]
    pub fn have_dependency_on(&self, dependency: &str) -> Self {
        self.filter("HaveDependencyOn", |r| {
            any_import_matches(r.imported_module_paths(), dependency)
        })
    }

    /// Keeps records with no import segment-matching `dependency`.
    #[must_use]
    pub fn do_not_have_dependency_on(&self, dependency: &str) -> Self {
        self.filter("DoNotHaveDependencyOn", |r| {
            !any_import_matches(r.imported_module_paths(), dependency)
        })
    }

    /// Keeps interface-like records that nominally provide `interface_name`.
    ///
    /// This is a name heuristic, not structural conformance: a record matches
    /// when it declares at least one method and either its own name or one of
    /// its declared method names equals `interface_name`.
    #[must_use]
    pub fn implement_interface(&self, interface_name: &str) -> Self {
        self.filter("ImplementInterface", |r| {
            r.is_interface_like()
                && !r.declared_method_names().is_empty()
                && (r.name() == interface_name
                    || r.declared_method_names().iter().any(|m| m == interface_name))
        })
    }

    /// Keeps struct-like records.
    #[must_use]
    pub fn be_struct(&self) -> Self {
        self.filter("BeStruct", TypeRecord::is_struct_like)
    }

    /// Keeps interface-like records.
    #[must_use]
    pub fn are_interfaces(&self) -> Self {
        self.filter("AreInterfaces", TypeRecord::is_interface_like)
    }

    /// Keeps records whose name ends with `suffix`.
    #[must_use]
    pub fn have_name_ending_with(&self, suffix: &str) -> Self {
        self.filter("HaveNameEndingWith", |r| r.name().ends_with(suffix))
    }

    /// Keeps records whose name starts with `prefix`.
    #[must_use]
    pub fn have_name_starting_with(&self, prefix: &str) -> Self {
        self.filter("HaveNameStartingWith", |r| r.name().starts_with(prefix))
    }

    /// Keeps records whose name matches the regular expression `pattern`.
    ///
    /// The match is unanchored; use `^...$` for whole-name matches. An
    /// invalid pattern produces an empty set rather than an error.
    #[must_use]
    pub fn name_matches(&self, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.filter("NameMatch", |r| re.is_match(r.name())),
            Err(e) => {
                debug!("NameMatch: invalid pattern {pattern:?}: {e}");
                self.derive(Vec::new(), self.filter_entry("NameMatch"), false)
            }
        }
    }

    /// Keeps records for which `predicate` returns true.
    ///
    /// `name` is recorded in the predicate log.
    #[must_use]
    pub fn with_custom_predicate<F>(&self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&TypeRecord) -> bool,
    {
        self.filter(name, predicate)
    }

    // ── Combinators ──

    /// Readability connector. Predicates already combine by sequential application.
    #[must_use]
    pub fn and(&self) -> Self {
        self.derive(self.current.clone(), PredicateLog::And, self.negate_next)
    }

    /// Union (by module path + name) of this set's records and `other`'s.
    ///
    /// The baseline and log come from `self`. When `other` was derived from a
    /// different universe its records are merged into a new arena.
    #[must_use]
    pub fn or(&self, other: &TypeSet) -> Self {
        let (arena, incoming) = if Arc::ptr_eq(&self.arena, &other.arena) {
            (Arc::clone(&self.arena), other.current.clone())
        } else {
            let mut merged = self.arena.to_vec();
            let offset = merged.len();
            merged.extend(other.current.iter().map(|&i| other.arena[i].clone()));
            let incoming = (offset..merged.len()).collect::<Vec<_>>();
            (Arc::<[TypeRecord]>::from(merged), incoming)
        };

        let mut current = Vec::with_capacity(self.current.len() + incoming.len());
        {
            let mut seen: HashSet<RecordKey<'_>> = HashSet::new();
            for i in self.current.iter().copied().chain(incoming) {
                if seen.insert(arena[i].key()) {
                    current.push(i);
                }
            }
        }

        let mut log = self.log.clone();
        log.push(PredicateLog::Or);
        Self {
            arena,
            current,
            baseline: self.baseline.clone(),
            log,
            negate_next: self.negate_next,
        }
    }

    /// Checkpoint: the current records become the baseline that positive
    /// failures are reported against.
    #[must_use]
    pub fn should(&self) -> Self {
        let mut next = self.derive(self.current.clone(), PredicateLog::Should, self.negate_next);
        next.baseline.clone_from(&self.current);
        next
    }

    /// Checkpoint that also negates the rest of the chain: records still
    /// matching at evaluation time are the violations.
    #[must_use]
    pub fn should_not(&self) -> Self {
        let mut next =
            self.derive(self.current.clone(), PredicateLog::Negation, self.negate_next);
        next.baseline.clone_from(&self.current);
        next
    }

    /// Negates the next narrowing predicate only.
    ///
    /// Each call toggles the pending negation, so `.not().not()` cancels out.
    #[must_use]
    pub fn not(&self) -> Self {
        self.derive(self.current.clone(), PredicateLog::Not, !self.negate_next)
    }

    // ── Evaluation and accessors ──

    /// Evaluates the chain. See [`outcome::evaluate`].
    #[must_use]
    pub fn evaluate(&self) -> Outcome {
        outcome::evaluate(self)
    }

    /// Records in current scope, unfiltered by evaluation.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeRecord> + '_ {
        self.current.iter().map(|&i| &self.arena[i])
    }

    /// Owned copies of the records in current scope.
    #[must_use]
    pub fn records(&self) -> Vec<TypeRecord> {
        self.iter().cloned().collect()
    }

    /// Records captured at the latest `should`/`should_not` checkpoint
    /// (every record when no checkpoint was taken).
    pub fn baseline_records(&self) -> impl ExactSizeIterator<Item = &TypeRecord> + '_ {
        self.baseline.iter().map(|&i| &self.arena[i])
    }

    /// Number of records in current scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Returns true if no record is in scope.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Ordered log of applied operations.
    #[must_use]
    pub fn applied_predicates(&self) -> &[PredicateLog] {
        &self.log
    }

    /// Whether `should_not()` was applied anywhere in the chain.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.log.contains(&PredicateLog::Negation)
    }

    /// Whether any filter or union was applied.
    #[must_use]
    pub fn has_assertions(&self) -> bool {
        self.log.iter().any(PredicateLog::is_assertion)
    }

    // ── Internals ──

    fn filter<F>(&self, name: impl Into<String>, keep: F) -> Self
    where
        F: Fn(&TypeRecord) -> bool,
    {
        let name = name.into();
        let invert = self.negate_next;
        let current: Vec<usize> = self
            .current
            .iter()
            .copied()
            .filter(|&i| keep(&self.arena[i]) != invert)
            .collect();
        debug!(
            "{}{name}: {} -> {} record(s)",
            if invert { "Not " } else { "" },
            self.current.len(),
            current.len()
        );
        let entry = if invert {
            PredicateLog::NegatedFilter(name)
        } else {
            PredicateLog::Filter(name)
        };
        self.derive(current, entry, false)
    }

    fn filter_entry(&self, name: &str) -> PredicateLog {
        if self.negate_next {
            PredicateLog::NegatedFilter(name.to_owned())
        } else {
            PredicateLog::Filter(name.to_owned())
        }
    }

    fn derive(&self, current: Vec<usize>, entry: PredicateLog, negate_next: bool) -> Self {
        let mut log = Vec::with_capacity(self.log.len() + 1);
        log.extend(self.log.iter().cloned());
        log.push(entry);
        Self {
            arena: Arc::clone(&self.arena),
            current,
            baseline: self.baseline.clone(),
            log,
            negate_next,
        }
    }
}

impl fmt::Debug for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSet")
            .field("current", &self.current.len())
            .field("baseline", &self.baseline.len())
            .field("universe", &self.arena.len())
            .field("log", &self.log)
            .field("negate_next", &self.negate_next)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{TypeRecord, Universe};

    fn sample() -> Universe {
        Universe::new(vec![
            TypeRecord::builder("User", "app/domain")
                .imports(["app/infrastructure"])
                .struct_like()
                .build(),
            TypeRecord::builder("UserRepository", "app/domain")
                .interface_like(["Save", "FindByID"])
                .build(),
            TypeRecord::builder("PostgresRepo", "app/infrastructure")
                .imports(["app/domain", "database/sql"])
                .struct_like()
                .build(),
            TypeRecord::builder("UserService", "app/application")
                .imports(["app/domain"])
                .struct_like()
                .build(),
            TypeRecord::builder("ID", "app/domain").build(),
        ])
    }

    fn names(set: &super::TypeSet) -> Vec<&str> {
        set.iter().map(TypeRecord::name).collect()
    }

    #[test]
    fn filters_narrow() {
        let u = sample();
        assert_eq!(
            names(&u.that().resides_in_namespace("domain")),
            ["User", "UserRepository", "ID"]
        );
        assert_eq!(names(&u.that().be_struct().resides_in_namespace("domain")), ["User"]);
        assert_eq!(names(&u.that().are_interfaces()), ["UserRepository"]);
        assert_eq!(
            names(&u.that().have_name_ending_with("Service")),
            ["UserService"]
        );
        assert_eq!(
            names(&u.that().have_name_starting_with("User")),
            ["User", "UserRepository", "UserService"]
        );
        assert_eq!(
            names(&u.that().resides_in_directory("infra")),
            ["PostgresRepo"]
        );
        assert_eq!(
            names(&u.that().do_not_reside_in_namespace("domain")),
            ["PostgresRepo", "UserService"]
        );
    }

    #[test]
    fn dependency_filters_are_complements() {
        let u = sample();
        let with = u.that().have_dependency_on("domain");
        let without = u.that().do_not_have_dependency_on("domain");
        assert_eq!(with.len() + without.len(), u.len());
        assert_eq!(names(&with), ["PostgresRepo", "UserService"]);
    }

    #[test]
    fn implement_interface_matches_name_or_method() {
        let u = sample();
        assert_eq!(
            names(&u.that().implement_interface("UserRepository")),
            ["UserRepository"]
        );
        assert_eq!(names(&u.that().implement_interface("Save")), ["UserRepository"]);
        assert!(u.that().implement_interface("User").is_empty());
    }

    #[test]
    fn name_matches_regex_and_invalid_pattern() {
        let u = sample();
        assert_eq!(names(&u.that().name_matches("^User$")), ["User"]);
        assert_eq!(names(&u.that().name_matches("Repo")), ["UserRepository", "PostgresRepo"]);
        let invalid = u.that().name_matches("([");
        assert!(invalid.is_empty());
        assert!(invalid.has_assertions());
    }

    #[test]
    fn invalid_pattern_stays_empty_under_not() {
        let u = sample();
        assert!(u.that().not().name_matches("([").is_empty());
    }

    #[test]
    fn custom_predicate_is_logged_by_name() {
        let u = sample();
        let set = u
            .that()
            .with_custom_predicate("IsService", |r| r.is_struct_like() && r.name().ends_with("Service"));
        assert_eq!(names(&set), ["UserService"]);
        assert_eq!(set.applied_predicates()[0].to_string(), "IsService");
    }

    #[test]
    fn and_does_not_filter() {
        let u = sample();
        let set = u.that().resides_in_namespace("domain");
        let anded = set.and();
        assert_eq!(names(&set), names(&anded));
        assert_eq!(anded.applied_predicates().len(), 2);
    }

    #[test]
    fn not_applies_to_next_filter_only() {
        let u = sample();
        let set = u.that().not().resides_in_namespace("domain").be_struct();
        assert_eq!(names(&set), ["PostgresRepo", "UserService"]);
        let log: Vec<String> = set.applied_predicates().iter().map(ToString::to_string).collect();
        assert_eq!(log, ["Not", "NotResideInNamespace", "BeStruct"]);
    }

    #[test]
    fn not_survives_markers() {
        let u = sample();
        let set = u.that().not().and().be_struct();
        assert_eq!(names(&set), ["UserRepository", "ID"]);
    }

    #[test]
    fn double_not_cancels() {
        let u = sample();
        let set = u.that().not().not().be_struct();
        assert_eq!(names(&set), ["User", "PostgresRepo", "UserService"]);
        assert_eq!(
            names(&u.that().not().not().not().be_struct()),
            ["UserRepository", "ID"]
        );
    }

    #[test]
    fn should_not_adds_negation_sentinel_and_checkpoint() {
        let u = sample();
        let set = u.that().resides_in_namespace("domain").should_not();
        assert!(set.is_negated());
        assert_eq!(set.baseline_records().len(), 3);
        let set = set.have_dependency_on("infrastructure");
        assert_eq!(set.baseline_records().len(), 3);
        assert_eq!(names(&set), ["User"]);
    }

    #[test]
    fn should_checkpoints_without_negation() {
        let u = sample();
        let set = u.that().be_struct().should();
        assert!(!set.is_negated());
        assert_eq!(set.baseline_records().len(), 3);
    }

    #[test]
    fn or_unions_without_duplicates() {
        let u = sample();
        let a = u.that().resides_in_namespace("application");
        let b = u.that().have_dependency_on("domain");
        let ab = a.or(&b);
        let ba = b.or(&a);
        let mut l = names(&ab);
        let mut r = names(&ba);
        l.sort_unstable();
        r.sort_unstable();
        assert_eq!(l, r);
        assert_eq!(l, ["PostgresRepo", "UserService"]);
        assert_eq!(names(&a.or(&a)), names(&a));
    }

    #[test]
    fn or_across_universes_merges_records() {
        let left = sample();
        let right = Universe::new(vec![
            TypeRecord::builder("Handler", "app/presentation").struct_like().build(),
            TypeRecord::builder("User", "app/domain").struct_like().build(),
        ]);
        let merged = left.that().resides_in_namespace("domain").or(&right.that());
        assert_eq!(names(&merged), ["User", "UserRepository", "ID", "Handler"]);
    }

    #[test]
    fn type_set_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<super::TypeSet>();
    }
}
