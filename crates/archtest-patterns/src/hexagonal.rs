//! Hexagonal (ports and adapters) architecture.

use crate::{forbid_all, require};
use archtest_core::{ArchitecturePattern, Filter, PatternError, Query, Rule, RuleCheck};

const NAME: &str = "Hexagonal Architecture";

/// Interface name adapters are expected to provide.
pub const PORT_INTERFACE: &str = "Port";

/// Domain at the center, ports around it, adapters outside.
///
/// Rules, in order:
/// 1. domain↛ports
/// 2. domain↛adapters
/// 3. the domain namespace contains at least one type (fails with no
///    offending records when empty)
/// 4. adapters should implement [`PORT_INTERFACE`]
///
/// # Errors
///
/// Returns [`PatternError::EmptyNamespace`] for a blank namespace.
pub fn hexagonal(
    domain: &str,
    ports: &str,
    adapters: &str,
) -> Result<ArchitecturePattern, PatternError> {
    require(NAME, "domain", domain)?;
    require(NAME, "ports", ports)?;
    require(NAME, "adapters", adapters)?;

    let mut rules = forbid_all([(domain, ports), (domain, adapters)]);
    rules.push(Rule::new(
        format!("namespace '{domain}' should contain domain types"),
        RuleCheck::NamespaceNotEmpty(domain.to_owned()),
    ));
    rules.push(Rule::from_query(Query::should(
        vec![Filter::ResidesInNamespace(adapters.to_owned())],
        vec![Filter::ImplementInterface(PORT_INTERFACE.to_owned())],
    )));

    Ok(ArchitecturePattern::new(NAME, rules))
}
