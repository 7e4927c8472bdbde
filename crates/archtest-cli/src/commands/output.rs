//! Shared output formatting for check reports.

use anyhow::Result;
use archtest_core::report::{html_report, text_report};
use archtest_core::{CheckReport, ValidationResult};

use crate::OutputFormat;

/// Print a check report in the specified format.
pub fn print(report: &CheckReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print!("{}", render_compact(report)),
        OutputFormat::Html => print!("{}", html_report(&results(report))),
    }
    Ok(())
}

fn results(report: &CheckReport) -> Vec<ValidationResult> {
    report.entries.iter().map(|e| e.result.clone()).collect()
}

fn print_text(report: &CheckReport) {
    print!("{}", text_report(&results(report)));

    let (errors, warnings, infos) = report.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "\n{}Found {} error(s), {} warning(s), {} info(s) in {} rule(s) over {} type(s)\x1b[0m",
        summary_color,
        errors,
        warnings,
        infos,
        report.entries.len(),
        report.types_checked
    );
}

fn print_json(report: &CheckReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

/// One line per offending type, or per failed rule when it names none.
fn render_compact(report: &CheckReport) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for entry in report.failed() {
        let r = &entry.result;
        let rule = format!("{} #{}", r.pattern_name, r.rule_index + 1);
        if r.violating_records.is_empty() {
            let _ = writeln!(out, "-: {} [{rule}] {}", entry.severity, r.rule_description);
        }
        for record in &r.violating_records {
            let _ = writeln!(
                out,
                "{}:{}: {} [{rule}] {} violates: {}",
                location(record.file()),
                record.line(),
                entry.severity,
                record,
                r.rule_description
            );
        }
    }
    out
}

fn location(file: &std::path::Path) -> std::borrow::Cow<'_, str> {
    if file.as_os_str().is_empty() {
        "-".into()
    } else {
        file.to_string_lossy()
    }
}
