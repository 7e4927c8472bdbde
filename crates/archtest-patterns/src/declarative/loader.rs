//! DTO → pattern conversion with validation.

use super::config_dto::{ArchConfigDto, FilterSetDto, PatternDto, RuleDto};
use super::ConfiguredPattern;
use crate::catalog::PatternKind;
use crate::cqrs::{CqrsLayout, EventSourcedLayout};

use archtest_core::{
    ArchitecturePattern, Filter, PatternError, Polarity, Query, Rule, RuleCheck, Severity,
};
use miette::Diagnostic;

/// Errors during DTO → pattern conversion.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LoadError {
    /// Unknown pattern kind.
    #[error("{context}: unknown pattern kind `{value}`")]
    #[diagnostic(
        code(archtest::config::unknown_kind),
        help("expected one of: layered, clean, hexagonal, mvc, cqrs, event-sourced-cqrs, ddd")
    )]
    UnknownKind {
        /// Where the error occurred (e.g., "patterns[0]").
        context: String,
        /// The invalid value.
        value: String,
    },

    /// A key the pattern kind requires is absent.
    #[error("{context}: `{kind}` pattern requires `{key}`")]
    #[diagnostic(code(archtest::config::missing_key))]
    MissingKey {
        /// Where the error occurred.
        context: String,
        /// Pattern kind.
        kind: PatternKind,
        /// Missing key.
        key: &'static str,
    },

    /// Unknown severity string.
    #[error("{context}: unknown severity `{value}`, expected: error, warning, info")]
    #[diagnostic(code(archtest::config::unknown_severity))]
    UnknownSeverity {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Rule without exactly one of `should` / `should_not`.
    #[error("{rule_name}: exactly one of `should` or `should_not` must be set")]
    #[diagnostic(code(archtest::config::ambiguous_assertion))]
    AmbiguousAssertion {
        /// The offending rule.
        rule_name: String,
    },

    /// Rule whose assertion table has no filter.
    #[error("{rule_name}: the assertion has no filter")]
    #[diagnostic(code(archtest::config::empty_assertion))]
    EmptyAssertion {
        /// The offending rule.
        rule_name: String,
    },

    /// The pattern factory rejected the parameters.
    #[error("{context}: {source}")]
    #[diagnostic(code(archtest::config::invalid_pattern))]
    Pattern {
        /// Where the error occurred.
        context: String,
        /// Factory error.
        source: PatternError,
    },
}

/// Converts an [`ArchConfigDto`] into configured patterns.
///
/// `[[patterns]]` come first in file order, then one single-rule pattern per
/// `[[rules]]` entry, named after the rule.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: ArchConfigDto) -> Result<Vec<ConfiguredPattern>, LoadError> {
    let mut out = Vec::with_capacity(dto.patterns.len() + dto.rules.len());
    for (i, p) in dto.patterns.iter().enumerate() {
        out.push(convert_pattern(p, &format!("patterns[{i}]"))?);
    }
    for (i, r) in dto.rules.iter().enumerate() {
        out.push(convert_rule(r, &format!("rules[{i}]"))?);
    }
    Ok(out)
}

fn parse_severity(s: &str, context: &str) -> Result<Severity, LoadError> {
    s.parse().map_err(|_| LoadError::UnknownSeverity {
        context: context.to_owned(),
        value: s.to_owned(),
    })
}

fn parse_kind(s: &str, context: &str) -> Result<PatternKind, LoadError> {
    crate::catalog()
        .iter()
        .map(|info| info.kind)
        .find(|k| k.key() == s)
        .ok_or_else(|| LoadError::UnknownKind {
            context: context.to_owned(),
            value: s.to_owned(),
        })
}

fn required<'a>(
    value: &'a Option<String>,
    key: &'static str,
    kind: PatternKind,
    context: &str,
) -> Result<&'a str, LoadError> {
    value.as_deref().ok_or_else(|| LoadError::MissingKey {
        context: context.to_owned(),
        kind,
        key,
    })
}

fn convert_pattern(dto: &PatternDto, context: &str) -> Result<ConfiguredPattern, LoadError> {
    let kind = parse_kind(&dto.kind, context)?;
    let severity = parse_severity(&dto.severity, context)?;

    let built = match kind {
        PatternKind::Layered => crate::layered(&dto.layers),
        PatternKind::Clean => crate::clean_architecture(
            required(&dto.domain, "domain", kind, context)?,
            required(&dto.application, "application", kind, context)?,
            required(&dto.infrastructure, "infrastructure", kind, context)?,
            required(&dto.presentation, "presentation", kind, context)?,
        ),
        PatternKind::Hexagonal => crate::hexagonal(
            required(&dto.domain, "domain", kind, context)?,
            required(&dto.ports, "ports", kind, context)?,
            required(&dto.adapters, "adapters", kind, context)?,
        ),
        PatternKind::Mvc => crate::mvc(
            required(&dto.model, "model", kind, context)?,
            required(&dto.view, "view", kind, context)?,
            required(&dto.controller, "controller", kind, context)?,
        ),
        PatternKind::Cqrs => crate::cqrs(&CqrsLayout {
            command: required(&dto.command, "command", kind, context)?,
            query: required(&dto.query, "query", kind, context)?,
            domain: dto.domain.as_deref(),
            write_model: dto.write_model.as_deref(),
            read_model: dto.read_model.as_deref(),
        }),
        PatternKind::EventSourcedCqrs => crate::event_sourced_cqrs(&EventSourcedLayout {
            command: required(&dto.command, "command", kind, context)?,
            query: required(&dto.query, "query", kind, context)?,
            event: dto.event.as_deref(),
            event_store: dto.event_store.as_deref(),
            projection: dto.projection.as_deref(),
            domain: dto.domain.as_deref(),
        }),
        PatternKind::Ddd => crate::ddd_with_clean_architecture(
            &dto.contexts,
            dto.shared.as_deref(),
            dto.pkg.as_deref(),
        ),
    };

    let pattern = built.map_err(|source| LoadError::Pattern {
        context: context.to_owned(),
        source,
    })?;
    Ok(ConfiguredPattern { pattern, severity })
}

fn convert_rule(dto: &RuleDto, context: &str) -> Result<ConfiguredPattern, LoadError> {
    let severity = parse_severity(&dto.severity, context)?;
    let (polarity, assertion) = match (&dto.should, &dto.should_not) {
        (Some(a), None) => (Polarity::Should, a),
        (None, Some(a)) => (Polarity::ShouldNot, a),
        _ => {
            return Err(LoadError::AmbiguousAssertion {
                rule_name: dto.name.clone(),
            })
        }
    };
    let assertion = convert_filters(assertion);
    if assertion.is_empty() {
        return Err(LoadError::EmptyAssertion {
            rule_name: dto.name.clone(),
        });
    }

    let query = Query {
        scope: convert_filters(&dto.that),
        polarity,
        assertion,
    };
    let description = dto.description.clone().unwrap_or_else(|| query.to_string());
    let rule = Rule::new(description, RuleCheck::Query(query));
    Ok(ConfiguredPattern {
        pattern: ArchitecturePattern::new(dto.name.clone(), vec![rule]),
        severity,
    })
}

/// Filters in [`FilterSetDto`] field order. `false` flags become negations.
fn convert_filters(dto: &FilterSetDto) -> Vec<Filter> {
    fn text(filters: &mut Vec<Filter>, value: &Option<String>, make: fn(String) -> Filter) {
        if let Some(v) = value {
            filters.push(make(v.clone()));
        }
    }
    fn flag(filters: &mut Vec<Filter>, value: Option<bool>, filter: Filter) {
        match value {
            Some(true) => filters.push(filter),
            Some(false) => filters.push(filter.negated()),
            None => {}
        }
    }

    let mut filters = Vec::new();
    text(&mut filters, &dto.resides_in_namespace, Filter::ResidesInNamespace);
    text(&mut filters, &dto.do_not_reside_in_namespace, Filter::DoNotResideInNamespace);
    text(&mut filters, &dto.resides_in_directory, Filter::ResidesInDirectory);
    text(&mut filters, &dto.have_dependency_on, Filter::HaveDependencyOn);
    text(&mut filters, &dto.do_not_have_dependency_on, Filter::DoNotHaveDependencyOn);
    text(&mut filters, &dto.implement_interface, Filter::ImplementInterface);
    flag(&mut filters, dto.be_struct, Filter::BeStruct);
    flag(&mut filters, dto.are_interfaces, Filter::AreInterfaces);
    text(&mut filters, &dto.have_name_ending_with, Filter::HaveNameEndingWith);
    text(&mut filters, &dto.have_name_starting_with, Filter::HaveNameStartingWith);
    text(&mut filters, &dto.name_matches, Filter::NameMatches);
    filters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_and_load(toml_str: &str) -> Result<Vec<ConfiguredPattern>, LoadError> {
        let dto: ArchConfigDto = toml::from_str(toml_str).unwrap();
        load(dto)
    }

    #[test]
    fn empty_config_loads_nothing() {
        assert!(parse_and_load("").unwrap().is_empty());
    }

    #[test]
    fn every_kind_loads() {
        let toml_str = r#"
[[patterns]]
kind = "layered"
layers = ["domain", "application", "presentation"]

[[patterns]]
kind = "clean"
domain = "domain"
application = "application"
infrastructure = "infrastructure"
presentation = "presentation"

[[patterns]]
kind = "hexagonal"
domain = "core"
ports = "ports"
adapters = "adapters"

[[patterns]]
kind = "mvc"
model = "models"
view = "views"
controller = "controllers"

[[patterns]]
kind = "cqrs"
command = "commands"
query = "queries"
write_model = "write"
read_model = "read"

[[patterns]]
kind = "event-sourced-cqrs"
command = "commands"
query = "queries"
event = "events"

[[patterns]]
kind = "ddd"
contexts = ["user", "order"]
shared = "internal/shared"
severity = "warning"
"#;
        let loaded = parse_and_load(toml_str).unwrap();
        let counts: Vec<usize> = loaded.iter().map(|c| c.pattern.rules().len()).collect();
        assert_eq!(counts, [3, 6, 4, 3, 6, 3, 12]);
        assert_eq!(loaded[6].severity, Severity::Warning);
        assert!(loaded[..6].iter().all(|c| c.severity == Severity::Error));
    }

    #[test]
    fn blank_shared_kernel_is_ignored() {
        let toml_str = r#"
[[patterns]]
kind = "ddd"
contexts = ["user", "order"]
shared = ""
"#;
        let loaded = parse_and_load(toml_str).unwrap();
        assert_eq!(loaded[0].pattern.rules().len(), 8);
    }

    #[test]
    fn single_rule_becomes_named_pattern() {
        let toml_str = r#"
[[rules]]
name = "services-are-structs"
severity = "info"
that = { resides_in_namespace = "application", have_name_ending_with = "Service" }
should = { be_struct = true }
"#;
        let loaded = parse_and_load(toml_str).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].pattern.name(), "services-are-structs");
        assert_eq!(loaded[0].severity, Severity::Info);
        assert_eq!(
            loaded[0].pattern.rules()[0].description(),
            "types that reside in namespace 'application' and have name ending with 'Service' should be structs"
        );
    }

    #[test]
    fn false_flag_negates() {
        let dto = FilterSetDto {
            are_interfaces: Some(false),
            name_matches: Some("^I".into()),
            ..FilterSetDto::default()
        };
        assert_eq!(
            convert_filters(&dto),
            [
                Filter::AreInterfaces.negated(),
                Filter::NameMatches("^I".into())
            ]
        );
    }

    #[test]
    fn missing_key_is_reported() {
        let err = parse_and_load("[[patterns]]\nkind = \"mvc\"\nmodel = \"m\"\nview = \"v\"\n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "patterns[0]: `mvc` pattern requires `controller`"
        );
    }

    #[test]
    fn unknown_kind_and_severity() {
        assert!(matches!(
            parse_and_load("[[patterns]]\nkind = \"onion\"\n").unwrap_err(),
            LoadError::UnknownKind { .. }
        ));
        assert!(matches!(
            parse_and_load("[[patterns]]\nkind = \"layered\"\nlayers = [\"a\", \"b\"]\nseverity = \"fatal\"\n")
                .unwrap_err(),
            LoadError::UnknownSeverity { .. }
        ));
    }

    #[test]
    fn factory_errors_carry_context() {
        let err = parse_and_load("[[patterns]]\nkind = \"layered\"\nlayers = [\"a\"]\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Pattern {
                source: PatternError::TooFewLayers { count: 1 },
                ..
            }
        ));
    }

    #[test]
    fn rule_needs_exactly_one_assertion() {
        let both = r#"
[[rules]]
name = "both"
should = { be_struct = true }
should_not = { be_struct = true }
"#;
        assert!(matches!(
            parse_and_load(both).unwrap_err(),
            LoadError::AmbiguousAssertion { .. }
        ));
        let empty = r#"
[[rules]]
name = "empty"
should = {}
"#;
        assert!(matches!(
            parse_and_load(empty).unwrap_err(),
            LoadError::EmptyAssertion { .. }
        ));
    }
}
