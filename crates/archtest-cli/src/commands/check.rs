//! Check command implementation.

use anyhow::Result;
use archtest_core::{CheckReport, Severity, Universe};
use archtest_patterns::declarative::ConfiguredPattern;

use crate::project::Project;
use crate::OutputFormat;

/// Options of `archtest check` beyond the path and config.
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Overrides `fail_on` from config.
    pub fail_on: Option<Severity>,
    /// Validate each pattern's rules on the rayon pool.
    pub parallel: bool,
}

/// Runs the check command.
pub fn run(project: &Project, options: CheckOptions) -> Result<()> {
    if project.patterns.is_empty() {
        tracing::warn!(
            "No [[patterns]] or [[rules]] configured; run `archtest init` to create archtest.toml"
        );
    }

    let universe = project.universe(&options.exclude);
    tracing::info!(
        "Validating {} pattern(s) against {} type(s) under {}",
        project.patterns.len(),
        universe.len(),
        project.root.display()
    );

    let report = build_report(&universe, &project.patterns, options.parallel);
    super::output::print(&report, options.format)?;

    let fail_on = options.fail_on.unwrap_or_else(|| project.config.fail_on());
    if report.has_failures_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}

/// Validates every configured pattern in declaration order.
fn build_report(universe: &Universe, patterns: &[ConfiguredPattern], parallel: bool) -> CheckReport {
    let mut report = CheckReport::new(universe.len());
    for configured in patterns {
        let results = if parallel {
            configured.pattern.validate_parallel(universe)
        } else {
            configured.pattern.validate(universe)
        };
        report.extend_pattern(configured.severity, results);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use archtest_core::TypeRecord;
    use archtest_patterns::declarative::load_patterns_from_toml;

    #[test]
    fn report_keeps_configured_severity_and_order() {
        let universe = Universe::new(vec![TypeRecord::builder("Cart", "shop/domain")
            .imports(["shop/web"])
            .struct_like()
            .build()]);
        let patterns = load_patterns_from_toml(
            r#"
[[patterns]]
kind = "layered"
layers = ["domain", "web"]
severity = "info"

[[rules]]
name = "carts-are-structs"
that = { have_name_starting_with = "Cart" }
should = { be_struct = true }
"#,
        )
        .unwrap();

        let sequential = build_report(&universe, &patterns, false);
        let parallel = build_report(&universe, &patterns, true);
        assert_eq!(sequential.entries, parallel.entries);

        let verdicts: Vec<(Severity, bool)> = sequential
            .entries
            .iter()
            .map(|e| (e.severity, e.result.succeeded))
            .collect();
        assert_eq!(
            verdicts,
            [(Severity::Info, false), (Severity::Error, true)]
        );
        assert!(sequential.has_failures_at(Severity::Info));
        assert!(!sequential.has_failures_at(Severity::Warning));
    }
}
