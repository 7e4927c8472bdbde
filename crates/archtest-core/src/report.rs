//! Plain-text and HTML renderings of pattern validation results.

use crate::pattern::ValidationResult;

use std::fmt::Write;

/// Renders results as text, one section per pattern, in input order.
///
/// ```
/// use archtest_core::report::text_report;
///
/// assert_eq!(text_report(&[]), "No rules evaluated.\n");
/// ```
#[must_use]
pub fn text_report(results: &[ValidationResult]) -> String {
    if results.is_empty() {
        return "No rules evaluated.\n".to_owned();
    }

    let mut out = String::new();
    for group in results.chunk_by(|a, b| a.pattern_name == b.pattern_name) {
        let name = &group[0].pattern_name;
        let title = format!("Validating {name}");
        let _ = writeln!(out, "{title}");
        let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));

        for r in group {
            let verdict = if r.succeeded { "PASS" } else { "FAIL" };
            let _ = writeln!(
                out,
                "Rule #{}: {verdict} - {}",
                r.rule_index + 1,
                r.rule_description
            );
            if !r.violating_records.is_empty() {
                let _ = writeln!(out, "Failing Types:");
                for record in &r.violating_records {
                    let _ = writeln!(out, "  - {record}");
                }
            }
        }

        let passed = group.iter().filter(|r| r.succeeded).count();
        let _ = writeln!(out, "\nSummary: {passed}/{} rules passed", group.len());
        if passed == group.len() {
            let _ = writeln!(out, "The codebase adheres to the {name} pattern.\n");
        } else {
            let _ = writeln!(out, "The codebase does NOT fully adhere to the {name} pattern.\n");
        }
    }
    out
}

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>archtest report</title>
<style>
body { font-family: sans-serif; line-height: 1.5; margin: 0; padding: 20px; }
.summary { margin: 20px 0; padding: 10px; background: #f5f5f5; border-radius: 4px; }
.rule { margin-bottom: 12px; padding: 10px; border-radius: 4px; }
.pass { background: #dff0d8; border: 1px solid #d6e9c6; }
.fail { background: #f2dede; border: 1px solid #ebccd1; }
.title { font-weight: bold; }
</style>
</head>
<body>
<h1>archtest report</h1>
"#;

/// Renders results as a standalone HTML page. All text is escaped.
#[must_use]
pub fn html_report(results: &[ValidationResult]) -> String {
    let mut out = String::from(HTML_HEAD);
    for group in results.chunk_by(|a, b| a.pattern_name == b.pattern_name) {
        let _ = writeln!(out, "<h2>{}</h2>", escape_html(&group[0].pattern_name));
        for r in group {
            let (class, verdict) = if r.succeeded {
                ("pass", "PASS")
            } else {
                ("fail", "FAIL")
            };
            let _ = writeln!(out, "<div class=\"rule {class}\">");
            let _ = writeln!(
                out,
                "<div class=\"title\">Rule #{}: {verdict}</div>",
                r.rule_index + 1
            );
            let _ = writeln!(out, "<div>{}</div>", escape_html(&r.rule_description));
            if !r.violating_records.is_empty() {
                out.push_str("<ul>\n");
                for record in &r.violating_records {
                    let _ = writeln!(out, "<li>{}</li>", escape_html(&record.to_string()));
                }
                out.push_str("</ul>\n");
            }
            out.push_str("</div>\n");
        }
    }
    let passed = results.iter().filter(|r| r.succeeded).count();
    let _ = writeln!(
        out,
        "<div class=\"summary\"><strong>Summary:</strong> {passed} passed, {} failed</div>",
        results.len() - passed
    );
    out.push_str("</body>\n</html>\n");
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
