//! Severity levels and the aggregated result of a check run.

use crate::pattern::ValidationResult;

use serde::{Deserialize, Serialize};

/// Severity attached to a rule or pattern.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, never fails a run.
    Info,
    /// Should be addressed.
    Warning,
    /// Must be fixed.
    #[default]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unknown severity '{other}' (expected info, warning or error)"
            )),
        }
    }
}

/// One rule result tagged with the severity it was configured at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Configured severity.
    pub severity: Severity,
    /// Rule result.
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Every rule result of a run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Results in evaluation order.
    pub entries: Vec<ReportEntry>,
    /// Number of types in the analyzed universe.
    pub types_checked: usize,
}

impl CheckReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(types_checked: usize) -> Self {
        Self {
            entries: Vec::new(),
            types_checked,
        }
    }

    /// Adds the results of one pattern at `severity`.
    pub fn extend_pattern(
        &mut self,
        severity: Severity,
        results: impl IntoIterator<Item = ValidationResult>,
    ) {
        self.entries.extend(
            results
                .into_iter()
                .map(|result| ReportEntry { severity, result }),
        );
    }

    /// Entries whose rule held.
    pub fn passed(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.result.succeeded)
    }

    /// Entries whose rule failed.
    pub fn failed(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| !e.result.succeeded)
    }

    /// Returns true if any failed entry is at or above `severity`.
    #[must_use]
    pub fn has_failures_at(&self, severity: Severity) -> bool {
        self.failed().any(|e| e.severity >= severity)
    }

    /// Failed entries per severity: `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.failed()
            .fold((0, 0, 0), |(e, w, i), entry| match entry.severity {
                Severity::Error => (e + 1, w, i),
                Severity::Warning => (e, w + 1, i),
                Severity::Info => (e, w, i + 1),
            })
    }

    /// Multi-line report of failures at or above `fail_on`, for `panic!()`
    /// messages under `cargo test`.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<&ReportEntry> =
            self.failed().filter(|e| e.severity >= fail_on).collect();

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== archtest: {} rule violation(s) ===\n",
            failing.len()
        );

        for entry in &failing {
            let r = &entry.result;
            let _ = writeln!(
                report,
                "{} rule #{}: {}",
                r.pattern_name,
                r.rule_index + 1,
                r.rule_description
            );
            let _ = writeln!(report, "  {}: rule failed", entry.severity);
            if r.violating_records.is_empty() {
                let _ = writeln!(report, "  = note: no types matched");
            }
            for record in &r.violating_records {
                if record.file().as_os_str().is_empty() {
                    let _ = writeln!(report, "  - {record}");
                } else {
                    let _ = writeln!(
                        report,
                        "  - {record} ({}:{})",
                        record.file().display(),
                        record.line()
                    );
                }
            }
            let _ = writeln!(report);
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {} error(s), {} warning(s), {} info(s) across {} rule(s) and {} type(s)",
            errors,
            warnings,
            infos,
            self.entries.len(),
            self.types_checked
        );

        report
    }
}
