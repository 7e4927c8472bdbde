//! Go import path resolution from `go.mod`.

use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// The `go.mod` governing an analyzed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModule {
    /// Module path from the `module` directive.
    pub path: String,
    /// Directory containing `go.mod`.
    pub dir: PathBuf,
}

impl GoModule {
    /// Finds the nearest `go.mod` in `start` or one of its ancestors.
    ///
    /// A `go.mod` that cannot be read or has no `module` directive is
    /// skipped with a warning and the search continues upward.
    #[must_use]
    pub fn discover(start: &Path) -> Option<Self> {
        for dir in start.ancestors() {
            let candidate = dir.join("go.mod");
            if !candidate.is_file() {
                continue;
            }
            match std::fs::read_to_string(&candidate) {
                Ok(content) => {
                    if let Some(path) = parse_module_directive(&content) {
                        debug!("Using module '{path}' from {}", candidate.display());
                        return Some(Self {
                            path,
                            dir: dir.to_path_buf(),
                        });
                    }
                    warn!("{} has no module directive", candidate.display());
                }
                Err(e) => warn!("Failed to read {}: {e}", candidate.display()),
            }
        }
        None
    }
}

/// Extracts the module path from `go.mod` content.
///
/// Accepts quoted and unquoted paths and trailing `//` comments.
#[must_use]
pub fn parse_module_directive(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// Import path of the package in `dir`.
///
/// With a module, this is the module path joined with `dir` relative to the
/// module directory. Without one, it is `dir` relative to `root`, and the
/// root itself is named after its last component.
#[must_use]
pub fn package_path(root: &Path, module: Option<&GoModule>, dir: &Path) -> String {
    match module {
        Some(m) => {
            let rel = dir.strip_prefix(&m.dir).map(slash_path).unwrap_or_default();
            if rel.is_empty() {
                m.path.clone()
            } else {
                format!("{}/{rel}", m.path)
            }
        }
        None => {
            let rel = dir.strip_prefix(root).map(slash_path).unwrap_or_default();
            if rel.is_empty() {
                root.file_name()
                    .map_or_else(|| ".".to_string(), |n| n.to_string_lossy().into_owned())
            } else {
                rel
            }
        }
    }
}

/// Joins normal path components with `/` regardless of platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
