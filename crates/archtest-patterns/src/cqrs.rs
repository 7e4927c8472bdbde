//! Command Query Responsibility Segregation, with and without event sourcing.

use crate::{forbid_all, require};
use archtest_core::{ArchitecturePattern, PatternError, Query, Rule};
use tracing::debug;

const CQRS: &str = "CQRS Architecture";
const EVENT_SOURCED: &str = "Event Sourced CQRS Architecture";

/// Namespaces of a CQRS layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CqrsLayout<'a> {
    /// Command (write) side.
    pub command: &'a str,
    /// Query (read) side.
    pub query: &'a str,
    /// Shared domain model. Both sides may use it; no rule is generated.
    pub domain: Option<&'a str>,
    /// Write model. Only used together with `read_model`.
    pub write_model: Option<&'a str>,
    /// Read model. Only used together with `write_model`.
    pub read_model: Option<&'a str>,
}

impl<'a> CqrsLayout<'a> {
    /// Layout with only the two sides.
    #[must_use]
    pub fn new(command: &'a str, query: &'a str) -> Self {
        Self {
            command,
            query,
            ..Self::default()
        }
    }

    /// Sets the shared domain namespace.
    #[must_use]
    pub fn domain(mut self, domain: &'a str) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Sets the write and read model namespaces.
    #[must_use]
    pub fn models(mut self, write_model: &'a str, read_model: &'a str) -> Self {
        self.write_model = Some(write_model);
        self.read_model = Some(read_model);
        self
    }
}

/// Commands and queries never depend on each other.
///
/// Rules: command↛query, query↛command; when both models are given also
/// write↛read, read↛write, command↛read, query↛write.
///
/// # Errors
///
/// Returns [`PatternError::EmptyNamespace`] for a blank namespace.
pub fn cqrs(layout: &CqrsLayout<'_>) -> Result<ArchitecturePattern, PatternError> {
    require(CQRS, "command", layout.command)?;
    require(CQRS, "query", layout.query)?;
    check_optional(CQRS, "domain", layout.domain)?;
    check_optional(CQRS, "write model", layout.write_model)?;
    check_optional(CQRS, "read model", layout.read_model)?;

    let mut pairs = vec![
        (layout.command, layout.query),
        (layout.query, layout.command),
    ];
    match (layout.write_model, layout.read_model) {
        (Some(write), Some(read)) => pairs.extend([
            (write, read),
            (read, write),
            (layout.command, read),
            (layout.query, write),
        ]),
        (None, None) => {}
        _ => debug!("cqrs: read/write model rules need both namespaces, skipping"),
    }

    Ok(ArchitecturePattern::new(CQRS, forbid_all(pairs)))
}

/// Namespaces of an event-sourced CQRS layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventSourcedLayout<'a> {
    /// Command side.
    pub command: &'a str,
    /// Query side.
    pub query: &'a str,
    /// Domain events.
    pub event: Option<&'a str>,
    /// Event store.
    pub event_store: Option<&'a str>,
    /// Read-model projections.
    pub projection: Option<&'a str>,
    /// Shared domain model.
    pub domain: Option<&'a str>,
}

impl<'a> EventSourcedLayout<'a> {
    /// Layout with only the two sides.
    #[must_use]
    pub fn new(command: &'a str, query: &'a str) -> Self {
        Self {
            command,
            query,
            ..Self::default()
        }
    }

    /// Sets the event namespace.
    #[must_use]
    pub fn event(mut self, event: &'a str) -> Self {
        self.event = Some(event);
        self
    }

    /// Sets the event store namespace.
    #[must_use]
    pub fn event_store(mut self, event_store: &'a str) -> Self {
        self.event_store = Some(event_store);
        self
    }

    /// Sets the projection namespace.
    #[must_use]
    pub fn projection(mut self, projection: &'a str) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Sets the shared domain namespace.
    #[must_use]
    pub fn domain(mut self, domain: &'a str) -> Self {
        self.domain = Some(domain);
        self
    }
}

/// CQRS where commands emit events into a store and queries read projections.
///
/// Rules, in order, each only when its namespaces are given:
/// 1. command↛query, query↛command
/// 2. command should depend on event
/// 3. command should depend on event store
/// 4. query↛event store
/// 5. projection should depend on event
/// 6. query should depend on projection
///
/// # Errors
///
/// Returns [`PatternError::EmptyNamespace`] for a blank namespace.
pub fn event_sourced_cqrs(
    layout: &EventSourcedLayout<'_>,
) -> Result<ArchitecturePattern, PatternError> {
    let mut base = CqrsLayout::new(layout.command, layout.query);
    base.domain = layout.domain;
    let mut rules = cqrs(&base)?.rules().to_vec();

    check_optional(EVENT_SOURCED, "event", layout.event)?;
    check_optional(EVENT_SOURCED, "event store", layout.event_store)?;
    check_optional(EVENT_SOURCED, "projection", layout.projection)?;

    let (command, query) = (layout.command, layout.query);
    if let Some(event) = layout.event {
        rules.push(Rule::from_query(Query::require_dependency(command, event)));
    }
    if let Some(store) = layout.event_store {
        rules.push(Rule::from_query(Query::require_dependency(command, store)));
        rules.push(Rule::from_query(Query::forbid_dependency(query, store)));
    }
    if let (Some(projection), Some(event)) = (layout.projection, layout.event) {
        rules.push(Rule::from_query(Query::require_dependency(projection, event)));
    }
    if let Some(projection) = layout.projection {
        rules.push(Rule::from_query(Query::require_dependency(query, projection)));
    }

    Ok(ArchitecturePattern::new(EVENT_SOURCED, rules))
}

fn check_optional(
    pattern: &'static str,
    role: &'static str,
    namespace: Option<&str>,
) -> Result<(), PatternError> {
    namespace.map_or(Ok(()), |ns| require(pattern, role, ns))
}
