//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to patterns via the loader.

use serde::Deserialize;

/// The `[[patterns]]` and `[[rules]]` arrays of `archtest.toml`.
///
/// Other top-level keys (`[analyzer]`, `fail_on`) are ignored here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchConfigDto {
    /// Built-in pattern instances.
    #[serde(default)]
    pub patterns: Vec<PatternDto>,

    /// Single-query rules.
    #[serde(default)]
    pub rules: Vec<RuleDto>,
}

/// One `[[patterns]]` entry. Which keys are required depends on `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternDto {
    /// Pattern kind (e.g., "clean", "ddd").
    pub kind: String,
    /// Severity (default: "error").
    #[serde(default = "default_severity_str")]
    pub severity: String,

    /// `layered`: layers from lowest to highest.
    #[serde(default)]
    pub layers: Vec<String>,

    /// `clean`, `hexagonal`, `cqrs`, `event-sourced-cqrs`.
    #[serde(default)]
    pub domain: Option<String>,
    /// `clean`.
    #[serde(default)]
    pub application: Option<String>,
    /// `clean`.
    #[serde(default)]
    pub infrastructure: Option<String>,
    /// `clean`.
    #[serde(default)]
    pub presentation: Option<String>,

    /// `hexagonal`.
    #[serde(default)]
    pub ports: Option<String>,
    /// `hexagonal`.
    #[serde(default)]
    pub adapters: Option<String>,

    /// `mvc`.
    #[serde(default)]
    pub model: Option<String>,
    /// `mvc`.
    #[serde(default)]
    pub view: Option<String>,
    /// `mvc`.
    #[serde(default)]
    pub controller: Option<String>,

    /// `cqrs`, `event-sourced-cqrs`.
    #[serde(default)]
    pub command: Option<String>,
    /// `cqrs`, `event-sourced-cqrs`.
    #[serde(default)]
    pub query: Option<String>,
    /// `cqrs`.
    #[serde(default)]
    pub write_model: Option<String>,
    /// `cqrs`.
    #[serde(default)]
    pub read_model: Option<String>,
    /// `event-sourced-cqrs`.
    #[serde(default)]
    pub event: Option<String>,
    /// `event-sourced-cqrs`.
    #[serde(default)]
    pub event_store: Option<String>,
    /// `event-sourced-cqrs`.
    #[serde(default)]
    pub projection: Option<String>,

    /// `ddd`: bounded context names.
    #[serde(default)]
    pub contexts: Vec<String>,
    /// `ddd`: shared kernel namespace.
    #[serde(default)]
    pub shared: Option<String>,
    /// `ddd`: utility namespace.
    #[serde(default)]
    pub pkg: Option<String>,
}

/// One `[[rules]]` entry: `that` scope plus exactly one of `should` / `should_not`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDto {
    /// Rule name (e.g., "services-are-structs").
    pub name: String,
    /// Optional description; defaults to the rendered query.
    #[serde(default)]
    pub description: Option<String>,
    /// Severity (default: "error").
    #[serde(default = "default_severity_str")]
    pub severity: String,
    /// Scope filters.
    #[serde(default)]
    pub that: FilterSetDto,
    /// Positive assertion.
    #[serde(default)]
    pub should: Option<FilterSetDto>,
    /// Negative assertion.
    #[serde(default)]
    pub should_not: Option<FilterSetDto>,
}

/// Inline table of filters, applied in field declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSetDto {
    /// Segment-aware namespace match.
    #[serde(default)]
    pub resides_in_namespace: Option<String>,
    /// Complement of `resides_in_namespace`.
    #[serde(default)]
    pub do_not_reside_in_namespace: Option<String>,
    /// Substring match on the module path.
    #[serde(default)]
    pub resides_in_directory: Option<String>,
    /// Segment-aware import match.
    #[serde(default)]
    pub have_dependency_on: Option<String>,
    /// Complement of `have_dependency_on`.
    #[serde(default)]
    pub do_not_have_dependency_on: Option<String>,
    /// Nominal interface match.
    #[serde(default)]
    pub implement_interface: Option<String>,
    /// `true` keeps structs, `false` keeps everything else.
    #[serde(default)]
    pub be_struct: Option<bool>,
    /// `true` keeps interfaces, `false` keeps everything else.
    #[serde(default)]
    pub are_interfaces: Option<bool>,
    /// Name suffix.
    #[serde(default)]
    pub have_name_ending_with: Option<String>,
    /// Name prefix.
    #[serde(default)]
    pub have_name_starting_with: Option<String>,
    /// Regular expression on the name.
    #[serde(default)]
    pub name_matches: Option<String>,
}

fn default_severity_str() -> String {
    "error".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_patterns_and_rules() {
        let toml_str = r#"
fail_on = "warning"

[analyzer]
root = "."

[[patterns]]
kind = "layered"
layers = ["domain", "application", "presentation"]

[[patterns]]
kind = "ddd"
contexts = ["user", "order"]
shared = "internal/shared"
severity = "warning"

[[rules]]
name = "services-are-structs"
that = { resides_in_namespace = "application", have_name_ending_with = "Service" }
should = { be_struct = true }
"#;
        let dto: ArchConfigDto = toml::from_str(toml_str).unwrap();
        assert_eq!(dto.patterns.len(), 2);
        assert_eq!(dto.patterns[0].layers.len(), 3);
        assert_eq!(dto.patterns[0].severity, "error");
        assert_eq!(dto.patterns[1].severity, "warning");
        assert_eq!(dto.patterns[1].shared.as_deref(), Some("internal/shared"));
        assert_eq!(dto.rules.len(), 1);
        assert_eq!(dto.rules[0].should.as_ref().and_then(|s| s.be_struct), Some(true));
        assert!(dto.rules[0].should_not.is_none());
    }

    #[test]
    fn unknown_filter_key_is_rejected() {
        let toml_str = r#"
[[rules]]
name = "typo"
that = { resides_in = "domain" }
should = { be_struct = true }
"#;
        assert!(toml::from_str::<ArchConfigDto>(toml_str).is_err());
    }

    #[test]
    fn empty_document_has_nothing() {
        let dto: ArchConfigDto = toml::from_str("").unwrap();
        assert!(dto.patterns.is_empty());
        assert!(dto.rules.is_empty());
    }
}
