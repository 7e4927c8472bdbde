//! Graphviz DOT rendering of module-level dependencies.

use crate::matching::segment_match;
use crate::model::TypeRecord;

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

const HEADER: &str = "digraph ArchitectureDependencies {\n  rankdir=TB;\n  node [shape=box, style=filled, fillcolor=lightblue];\n";

/// Renders the module dependency graph of `records` as DOT.
///
/// One node per distinct module path, in order of first appearance. An
/// import draws an edge to the known module it segment-matches (the longest
/// one when several do); self edges and duplicates are dropped. An empty
/// input renders a single placeholder note.
#[must_use]
pub fn dependency_graph<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a TypeRecord>,
{
    let records: Vec<&TypeRecord> = records.into_iter().collect();
    let mut dot = String::from(HEADER);

    if records.is_empty() {
        dot.push_str(
            "  note [label=\"No types provided or empty type set\", shape=note, fillcolor=lightyellow];\n",
        );
        dot.push_str("}\n");
        return dot;
    }

    let mut modules: Vec<&str> = Vec::new();
    let mut ids: HashMap<&str, usize> = HashMap::new();
    for record in &records {
        let path = record.module_path();
        if !ids.contains_key(path) {
            ids.insert(path, modules.len());
            modules.push(path);
        }
    }
    for (id, path) in modules.iter().enumerate() {
        let _ = writeln!(dot, "  node{id} [label=\"{}\"];", escape_label(path));
    }

    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    for record in &records {
        let src = ids[record.module_path()];
        for import in record.imported_module_paths() {
            let target = modules
                .iter()
                .enumerate()
                .filter(|(_, m)| segment_match(import, m))
                .max_by_key(|(_, m)| m.len())
                .map(|(id, _)| id);
            if let Some(dst) = target {
                if dst != src && seen.insert((src, dst)) {
                    let _ = writeln!(dot, "  node{src} -> node{dst};");
                }
            }
        }
    }

    dot.push_str("}\n");
    dot
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
