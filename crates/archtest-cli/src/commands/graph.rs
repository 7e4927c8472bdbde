//! Graph command implementation.

use anyhow::{Context, Result};
use archtest_core::graph::dependency_graph;
use std::path::PathBuf;

use crate::project::Project;

/// Runs the graph command: renders module dependencies as Graphviz DOT.
pub fn run(
    project: &Project,
    namespace: Option<&str>,
    output: Option<PathBuf>,
    exclude: &[String],
) -> Result<()> {
    let universe = project.universe(exclude);

    let scope = match namespace {
        Some(ns) => universe.that().resides_in_namespace(ns),
        None => universe.that(),
    };
    let dot = dependency_graph(scope.iter());

    match output {
        Some(file) => {
            std::fs::write(&file, &dot)
                .with_context(|| format!("Failed to write {}", file.display()))?;
            println!("Wrote {}", file.display());
        }
        None => print!("{dot}"),
    }

    Ok(())
}
