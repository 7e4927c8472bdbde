//! Internal runner for `check!()` macro integration.
//!
//! This module is `#[doc(hidden)]` and not part of the public API.
//! It is called by the generated test function from `archtest::check!()`.

use archtest_core::{CheckReport, Config, Severity, Universe};
use archtest_go::GoSourceOracle;
use archtest_patterns::declarative::{load_patterns_from_toml, ConfiguredPattern};
use std::path::{Path, PathBuf};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["archtest.toml", ".archtest.toml"];

/// Runs the configured architecture checks as part of `cargo test`.
///
/// Called by the `check!()` macro-generated test function.
///
/// # Panics
///
/// Panics with a formatted report if rules fail at or above `fail_on`
/// severity, or if the configuration cannot be read or is invalid.
pub fn run_check(config_path: Option<&str>, fail_on: Option<&str>) {
    let project_root = find_project_root();
    let (content, config_dir) = read_config_content(&project_root, config_path);
    let config = parse_config(&content);
    let effective_fail_on = resolve_fail_on(fail_on, &config);
    let patterns = load_configured_patterns(&content);

    if patterns.is_empty() {
        tracing::warn!("archtest: no [[patterns]] or [[rules]] configured, nothing to check");
        return;
    }

    let report = build_report(&config, &config_dir, &patterns);
    if report.has_failures_at(effective_fail_on) {
        panic!("{}", report.format_test_report(effective_fail_on));
    }
}

/// Analyzes the configured root and validates every pattern against it.
fn build_report(config: &Config, config_dir: &Path, patterns: &[ConfiguredPattern]) -> CheckReport {
    let root = config_dir.join(&config.analyzer.root);
    let oracle = GoSourceOracle::from_config(&config.analyzer);
    let universe = Universe::build(&oracle, &root);

    let mut report = CheckReport::new(universe.len());
    for configured in patterns {
        report.extend_pattern(configured.severity, configured.pattern.validate(&universe));
    }
    report
}

/// Reads the raw TOML content and the directory it was found in.
///
/// Returns empty content and `root` if no config file is found.
fn read_config_content(root: &Path, explicit_path: Option<&str>) -> (String, PathBuf) {
    let read = |path: &Path| {
        let content = std::fs::read_to_string(path).unwrap_or_else(|e| {
            panic!("archtest: failed to read config from {}: {e}", path.display());
        });
        let dir = path.parent().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
        (content, dir)
    };

    if let Some(path) = explicit_path {
        let full_path = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            root.join(path)
        };
        return read(&full_path);
    }

    for candidate in CONFIG_CANDIDATES {
        let path = root.join(candidate);
        if path.exists() {
            return read(&path);
        }
    }

    (String::new(), root.to_path_buf())
}

/// Parses a `Config` from TOML content.
fn parse_config(content: &str) -> Config {
    if content.is_empty() {
        return Config::default();
    }
    Config::parse(content).unwrap_or_else(|e| {
        panic!("archtest: failed to parse config: {e}");
    })
}

/// Builds configured patterns and rules from TOML content.
fn load_configured_patterns(content: &str) -> Vec<ConfiguredPattern> {
    if content.is_empty() {
        return vec![];
    }
    load_patterns_from_toml(content)
        .unwrap_or_else(|e| panic!("archtest: pattern config error: {e}"))
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the workspace root above `CARGO_MANIFEST_DIR`, else the manifest
/// dir itself, else the current directory.
fn find_project_root() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let manifest_path = PathBuf::from(&manifest_dir);

        let mut candidate = manifest_path.as_path();
        loop {
            let cargo_toml = candidate.join("Cargo.toml");
            if cargo_toml.exists() && has_workspace_section(&cargo_toml) {
                return candidate.to_path_buf();
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => break,
            }
        }

        return manifest_path;
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolves the effective `fail_on` severity.
///
/// Priority: explicit macro arg > config file > default ("error").
fn resolve_fail_on(macro_arg: Option<&str>, config: &Config) -> Severity {
    match macro_arg {
        Some(name) => name
            .parse()
            .unwrap_or_else(|e| panic!("archtest: {e}")),
        None => config.fail_on(),
    }
}
