//! Listing of the built-in patterns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in pattern kinds, as named in `archtest.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    /// [`layered`](crate::layered)
    Layered,
    /// [`clean_architecture`](crate::clean_architecture)
    Clean,
    /// [`hexagonal`](crate::hexagonal)
    Hexagonal,
    /// [`mvc`](crate::mvc)
    Mvc,
    /// [`cqrs`](crate::cqrs)
    Cqrs,
    /// [`event_sourced_cqrs`](crate::event_sourced_cqrs)
    EventSourcedCqrs,
    /// [`ddd_with_clean_architecture`](crate::ddd_with_clean_architecture)
    Ddd,
}

impl PatternKind {
    /// Config key for this kind.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Layered => "layered",
            Self::Clean => "clean",
            Self::Hexagonal => "hexagonal",
            Self::Mvc => "mvc",
            Self::Cqrs => "cqrs",
            Self::EventSourcedCqrs => "event-sourced-cqrs",
            Self::Ddd => "ddd",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Description of one built-in pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternInfo {
    /// Kind, as used in config.
    pub kind: PatternKind,
    /// Display name.
    pub name: &'static str,
    /// One-line summary.
    pub summary: &'static str,
    /// Config keys, optional ones suffixed with `?`.
    pub parameters: &'static [&'static str],
}

/// Every built-in pattern, in documentation order.
#[must_use]
pub fn catalog() -> &'static [PatternInfo] {
    &CATALOG
}

static CATALOG: [PatternInfo; 7] = [
    PatternInfo {
        kind: PatternKind::Layered,
        name: "Layered Architecture",
        summary: "each layer must not depend on any layer listed after it",
        parameters: &["layers"],
    },
    PatternInfo {
        kind: PatternKind::Clean,
        name: "Clean Architecture",
        summary: "dependencies point inward towards the domain",
        parameters: &["domain", "application", "infrastructure", "presentation"],
    },
    PatternInfo {
        kind: PatternKind::Hexagonal,
        name: "Hexagonal Architecture",
        summary: "domain isolated from ports and adapters; adapters implement Port",
        parameters: &["domain", "ports", "adapters"],
    },
    PatternInfo {
        kind: PatternKind::Mvc,
        name: "MVC Architecture",
        summary: "models know nothing of views or controllers",
        parameters: &["model", "view", "controller"],
    },
    PatternInfo {
        kind: PatternKind::Cqrs,
        name: "CQRS Architecture",
        summary: "commands and queries never depend on each other",
        parameters: &["command", "query", "domain?", "write_model?", "read_model?"],
    },
    PatternInfo {
        kind: PatternKind::EventSourcedCqrs,
        name: "Event Sourced CQRS Architecture",
        summary: "CQRS where commands emit events and queries read projections",
        parameters: &[
            "command",
            "query",
            "event?",
            "event_store?",
            "projection?",
            "domain?",
        ],
    },
    PatternInfo {
        kind: PatternKind::Ddd,
        name: "DDD with Clean Architecture",
        summary: "bounded contexts under internal/<ctx> isolated from each other",
        parameters: &["contexts", "shared?", "pkg?"],
    },
];
