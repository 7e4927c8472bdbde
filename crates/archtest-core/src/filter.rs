//! Filters and queries as data.
//!
//! Generated pattern rules and config-declared rules are values, not
//! closures, so they can be printed, compared and built from TOML.

use crate::outcome::Outcome;
use crate::type_set::TypeSet;
use crate::universe::Universe;

use std::fmt;

/// One filtering predicate of [`TypeSet`], as data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    /// [`TypeSet::resides_in_namespace`].
    ResidesInNamespace(String),
    /// [`TypeSet::do_not_reside_in_namespace`].
    DoNotResideInNamespace(String),
    /// [`TypeSet::resides_in_directory`].
    ResidesInDirectory(String),
    /// [`TypeSet::have_dependency_on`].
    HaveDependencyOn(String),
    /// [`TypeSet::do_not_have_dependency_on`].
    DoNotHaveDependencyOn(String),
    /// [`TypeSet::implement_interface`].
    ImplementInterface(String),
    /// [`TypeSet::be_struct`].
    BeStruct,
    /// [`TypeSet::are_interfaces`].
    AreInterfaces,
    /// [`TypeSet::have_name_ending_with`].
    HaveNameEndingWith(String),
    /// [`TypeSet::have_name_starting_with`].
    HaveNameStartingWith(String),
    /// [`TypeSet::name_matches`].
    NameMatches(String),
    /// The inner filter applied under [`TypeSet::not`].
    Not(Box<Filter>),
}

impl Filter {
    /// Applies the filter to `set`, returning the narrowed set.
    #[must_use]
    pub fn apply(&self, set: &TypeSet) -> TypeSet {
        match self {
            Self::ResidesInNamespace(ns) => set.resides_in_namespace(ns),
            Self::DoNotResideInNamespace(ns) => set.do_not_reside_in_namespace(ns),
            Self::ResidesInDirectory(dir) => set.resides_in_directory(dir),
            Self::HaveDependencyOn(dep) => set.have_dependency_on(dep),
            Self::DoNotHaveDependencyOn(dep) => set.do_not_have_dependency_on(dep),
            Self::ImplementInterface(name) => set.implement_interface(name),
            Self::BeStruct => set.be_struct(),
            Self::AreInterfaces => set.are_interfaces(),
            Self::HaveNameEndingWith(suffix) => set.have_name_ending_with(suffix),
            Self::HaveNameStartingWith(prefix) => set.have_name_starting_with(prefix),
            Self::NameMatches(pattern) => set.name_matches(pattern),
            Self::Not(inner) => inner.apply(&set.not()),
        }
    }

    /// Wraps this filter in [`Filter::Not`].
    #[must_use]
    pub fn negated(self) -> Self {
        Self::Not(Box::new(self))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResidesInNamespace(ns) => write!(f, "reside in namespace '{ns}'"),
            Self::DoNotResideInNamespace(ns) => write!(f, "do not reside in namespace '{ns}'"),
            Self::ResidesInDirectory(dir) => write!(f, "reside in directory '{dir}'"),
            Self::HaveDependencyOn(dep) => write!(f, "have dependency on '{dep}'"),
            Self::DoNotHaveDependencyOn(dep) => write!(f, "do not have dependency on '{dep}'"),
            Self::ImplementInterface(name) => write!(f, "implement interface '{name}'"),
            Self::BeStruct => f.write_str("be structs"),
            Self::AreInterfaces => f.write_str("be interfaces"),
            Self::HaveNameEndingWith(s) => write!(f, "have name ending with '{s}'"),
            Self::HaveNameStartingWith(s) => write!(f, "have name starting with '{s}'"),
            Self::NameMatches(p) => write!(f, "have name matching /{p}/"),
            Self::Not(inner) => write!(f, "not {inner}"),
        }
    }
}

/// Whether a query asserts its assertion filters or forbids them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// `should()`: at least one scoped type must satisfy the assertion.
    Should,
    /// `should_not()`: no scoped type may satisfy the assertion.
    ShouldNot,
}

/// `that(scope...).should[_not](assertion...)` as data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    /// Filters selecting the types under test.
    pub scope: Vec<Filter>,
    /// Checkpoint kind.
    pub polarity: Polarity,
    /// Filters applied after the checkpoint.
    pub assertion: Vec<Filter>,
}

impl Query {
    /// A positive query.
    #[must_use]
    pub fn should(scope: Vec<Filter>, assertion: Vec<Filter>) -> Self {
        Self {
            scope,
            polarity: Polarity::Should,
            assertion,
        }
    }

    /// A negated query.
    #[must_use]
    pub fn should_not(scope: Vec<Filter>, assertion: Vec<Filter>) -> Self {
        Self {
            scope,
            polarity: Polarity::ShouldNot,
            assertion,
        }
    }

    /// Shorthand for "types in `namespace` should not depend on `dependency`".
    #[must_use]
    pub fn forbid_dependency(namespace: &str, dependency: &str) -> Self {
        Self::should_not(
            vec![Filter::ResidesInNamespace(namespace.to_owned())],
            vec![Filter::HaveDependencyOn(dependency.to_owned())],
        )
    }

    /// Shorthand for "types in `namespace` should depend on `dependency`".
    #[must_use]
    pub fn require_dependency(namespace: &str, dependency: &str) -> Self {
        Self::should(
            vec![Filter::ResidesInNamespace(namespace.to_owned())],
            vec![Filter::HaveDependencyOn(dependency.to_owned())],
        )
    }

    /// Builds the chain on a fresh cursor of `universe` without evaluating it.
    #[must_use]
    pub fn chain(&self, universe: &Universe) -> TypeSet {
        let scoped = self
            .scope
            .iter()
            .fold(universe.that(), |set, filter| filter.apply(&set));
        let checkpoint = match self.polarity {
            Polarity::Should => scoped.should(),
            Polarity::ShouldNot => scoped.should_not(),
        };
        self.assertion
            .iter()
            .fold(checkpoint, |set, filter| filter.apply(&set))
    }

    /// Builds and evaluates the chain.
    #[must_use]
    pub fn run(&self, universe: &Universe) -> Outcome {
        self.chain(universe).evaluate()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("types that ")?;
        if self.scope.is_empty() {
            f.write_str("exist")?;
        }
        write_joined(f, &self.scope)?;
        match self.polarity {
            Polarity::Should => f.write_str(" should ")?,
            Polarity::ShouldNot => f.write_str(" should not ")?,
        }
        write_joined(f, &self.assertion)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, filters: &[Filter]) -> fmt::Result {
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            f.write_str(" and ")?;
        }
        write!(f, "{filter}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeRecord;

    fn universe() -> Universe {
        Universe::new(vec![
            TypeRecord::builder("User", "shop/domain")
                .imports(["shop/infrastructure"])
                .struct_like()
                .build(),
            TypeRecord::builder("Db", "shop/infrastructure")
                .imports(["shop/domain"])
                .struct_like()
                .build(),
            TypeRecord::builder("Port", "shop/domain")
                .interface_like(["Port"])
                .build(),
        ])
    }

    #[test]
    fn forbid_dependency_reports_offenders() {
        let out = Query::forbid_dependency("domain", "infrastructure").run(&universe());
        assert!(!out.is_success());
        assert_eq!(out.violating_records.len(), 1);
        assert_eq!(out.violating_records[0].name(), "User");
    }

    #[test]
    fn not_filter_negates_inner() {
        let u = universe();
        let set = Filter::BeStruct.negated().apply(&u.that());
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].name(), "Port");
    }

    #[test]
    fn nested_not_filters_cancel() {
        let u = universe();
        let set = Filter::BeStruct.negated().negated().apply(&u.that());
        let names: Vec<&str> = set.iter().map(TypeRecord::name).collect();
        assert_eq!(names, ["User", "Db"]);
    }

    #[test]
    fn chain_logs_checkpoint() {
        let q = Query::should(
            vec![Filter::ResidesInNamespace("domain".into())],
            vec![Filter::ImplementInterface("Port".into())],
        );
        let set = q.chain(&universe());
        let log: Vec<String> = set
            .applied_predicates()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(log, ["ResideInNamespace", "Should", "ImplementInterface"]);
        assert!(q.run(&universe()).is_success());
    }

    #[test]
    fn display_reads_like_a_sentence() {
        let q = Query::forbid_dependency("domain", "infrastructure");
        assert_eq!(
            q.to_string(),
            "types that reside in namespace 'domain' should not have dependency on 'infrastructure'"
        );
        let q = Query::should(vec![], vec![Filter::BeStruct, Filter::NameMatches("^A".into())]);
        assert_eq!(
            q.to_string(),
            "types that exist should be structs and have name matching /^A/"
        );
    }
}
