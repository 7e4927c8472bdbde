//! Types command implementation: lists the extracted type model.

use anyhow::Result;
use archtest_core::TypeRecord;
use serde::Serialize;

use crate::project::Project;
use crate::OutputFormat;

#[derive(Serialize)]
struct TypeRow<'a> {
    name: &'a str,
    kind: &'static str,
    module_name: &'a str,
    module_path: &'a str,
    file: String,
    line: usize,
    imports: &'a [String],
    methods: &'a [String],
}

impl<'a> From<&'a TypeRecord> for TypeRow<'a> {
    fn from(r: &'a TypeRecord) -> Self {
        Self {
            name: r.name(),
            kind: kind(r),
            module_name: r.module_name(),
            module_path: r.module_path(),
            file: r.file().display().to_string(),
            line: r.line(),
            imports: r.imported_module_paths(),
            methods: r.declared_method_names(),
        }
    }
}

fn kind(record: &TypeRecord) -> &'static str {
    if record.is_struct_like() {
        "struct"
    } else if record.is_interface_like() {
        "interface"
    } else {
        "other"
    }
}

/// Runs the types command.
pub fn run(
    project: &Project,
    namespace: Option<&str>,
    format: OutputFormat,
    exclude: &[String],
) -> Result<()> {
    let universe = project.universe(exclude);
    let scope = match namespace {
        Some(ns) => universe.that().resides_in_namespace(ns),
        None => universe.that(),
    };

    let mut rows: Vec<TypeRow<'_>> = scope.iter().map(TypeRow::from).collect();
    rows.sort_by(|a, b| (a.module_path, a.name).cmp(&(b.module_path, b.name)));

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        _ => print!("{}", render_table(&rows)),
    }
    Ok(())
}

fn render_table(rows: &[TypeRow<'_>]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(out, "{:<40} {:<30} {:<10} Location", "Module", "Type", "Kind");
    let _ = writeln!(out, "{}", "-".repeat(100));
    for row in rows {
        let _ = writeln!(
            out,
            "{:<40} {:<30} {:<10} {}:{}",
            row.module_path, row.name, row.kind, row.file, row.line
        );
    }
    let _ = writeln!(out, "\n{} type(s)", rows.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_table() {
        let records = [
            TypeRecord::builder("Order", "shop/domain")
                .struct_like()
                .location("domain/order.go", 3)
                .build(),
            TypeRecord::builder("Store", "shop/domain")
                .interface_like(["Save"])
                .build(),
            TypeRecord::builder("ID", "shop/domain").build(),
        ];
        let rows: Vec<TypeRow<'_>> = records.iter().map(TypeRow::from).collect();
        let kinds: Vec<&str> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, ["struct", "interface", "other"]);

        let table = render_table(&rows);
        assert!(table.contains("domain/order.go:3"));
        assert!(table.ends_with("\n3 type(s)\n"));
    }
}
