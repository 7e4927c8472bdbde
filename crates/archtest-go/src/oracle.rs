//! Directory walker that turns a Go source tree into compilation units.

use archtest_core::{
    AnalyzerConfig, CompilationUnit, OracleError, RawDeclaration, SourceOracle,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::extractor::{ExtractError, LanguageExtractor};
use crate::golang::GoExtractor;
use crate::module::{package_path, GoModule};

/// A file exclusion glob, with a directory-segment fallback for `**/dir/**`.
#[derive(Debug, Clone)]
struct ExcludePattern {
    raw: String,
    compiled: Option<glob::Pattern>,
}

impl ExcludePattern {
    fn new(raw: &str) -> Self {
        let compiled = match glob::Pattern::new(raw) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("Invalid exclude pattern '{raw}': {e}");
                None
            }
        };
        Self {
            raw: raw.to_string(),
            compiled,
        }
    }

    fn matches(&self, rel: &str) -> bool {
        if self.compiled.as_ref().is_some_and(|p| p.matches(rel)) {
            return true;
        }
        let dir = self.raw.trim_start_matches("**/").trim_end_matches("/**");
        !dir.is_empty()
            && !dir.contains('*')
            && self.raw.ends_with("/**")
            && format!("/{rel}").contains(&format!("/{dir}/"))
    }
}

/// [`SourceOracle`] for Go source trees.
///
/// Every `.go` file under the root becomes one compilation unit whose module
/// path is the Go import path of its directory. Files are parsed in parallel;
/// units come back in path order.
///
/// # Example
///
/// ```no_run
/// use archtest_core::Universe;
/// use archtest_go::GoSourceOracle;
/// use std::path::Path;
///
/// let oracle = GoSourceOracle::new()
///     .exclude(["**/mocks/**"])
///     .include_tests(false);
/// let universe = Universe::build(&oracle, Path::new("./service"));
/// ```
#[derive(Debug, Clone)]
pub struct GoSourceOracle {
    extractor: GoExtractor,
    exclude: Vec<ExcludePattern>,
    include_tests: bool,
}

impl Default for GoSourceOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl GoSourceOracle {
    /// Creates an oracle with no exclusions that also reads `_test.go` files.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractor: GoExtractor::new(),
            exclude: Vec::new(),
            include_tests: true,
        }
    }

    /// Creates an oracle from the `[analyzer]` configuration table.
    #[must_use]
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new()
            .exclude(&config.exclude)
            .include_tests(config.include_tests)
    }

    /// Adds glob patterns (matched against root-relative paths) of files to skip.
    #[must_use]
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude
            .extend(patterns.into_iter().map(|p| ExcludePattern::new(p.as_ref())));
        self
    }

    /// Sets whether `_test.go` files are read.
    #[must_use]
    pub fn include_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    fn is_excluded(&self, rel: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(rel))
    }

    fn discover_files(&self, root: &Path) -> Result<Vec<PathBuf>, OracleError> {
        let exts = self.extractor.extensions();
        let mut builder = ignore::WalkBuilder::new(root);
        builder.hidden(false).git_ignore(true);

        let mut files = Vec::new();
        let mut walked_any = false;
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if !walked_any => {
                    return Err(OracleError::Walk {
                        path: root.to_path_buf(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {e}", root.display());
                    continue;
                }
            };
            walked_any = true;

            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !exts.iter().any(|ext| name.ends_with(ext)) {
                continue;
            }
            if !self.include_tests && name.ends_with("_test.go") {
                continue;
            }

            let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
            if self.is_excluded(&rel) {
                debug!("Excluding: {rel}");
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn load_file(
        &self,
        root: &Path,
        module: Option<&GoModule>,
        path: &Path,
    ) -> Result<CompilationUnit, ExtractError> {
        let source = std::fs::read_to_string(path)?;
        let analysis = self.extractor.analyze(&source)?;
        let package = analysis.package.ok_or(ExtractError::MissingPackage)?;

        let dir = path.parent().unwrap_or(root);
        Ok(CompilationUnit {
            module_name: package.name,
            module_path: package_path(root, module, dir),
            file: path.strip_prefix(root).unwrap_or(path).to_path_buf(),
            imports: analysis.imports.into_iter().map(|i| i.path).collect(),
            declarations: analysis
                .declarations
                .into_iter()
                .map(|d| {
                    RawDeclaration::new(d.name, d.kind)
                        .with_methods(d.methods)
                        .at_line(d.line)
                })
                .collect(),
        })
    }
}

impl SourceOracle for GoSourceOracle {
    fn language_id(&self) -> &'static str {
        self.extractor.language_id()
    }

    fn load(&self, root: &Path) -> Result<Vec<CompilationUnit>, OracleError> {
        if !root.exists() {
            return Err(OracleError::MissingRoot {
                path: root.to_path_buf(),
            });
        }
        let root = root.canonicalize()?;
        let module = GoModule::discover(&root);
        let files = self.discover_files(&root)?;
        debug!("Found {} Go file(s) under {}", files.len(), root.display());

        let units = files
            .par_iter()
            .filter_map(|path| match self.load_file(&root, module.as_ref(), path) {
                Ok(unit) => Some(unit),
                Err(e) => {
                    warn!("Skipping {}: {e}", path.display());
                    None
                }
            })
            .collect();
        Ok(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclude_patterns_match_relative_paths() {
        let oracle = GoSourceOracle::new().exclude(["**/vendor/**", "gen/*.go", "["]);
        assert!(oracle.is_excluded("vendor/x/y.go"));
        assert!(oracle.is_excluded("internal/vendor/y.go"));
        assert!(oracle.is_excluded("gen/models.go"));
        assert!(!oracle.is_excluded("internal/vendored/y.go"));
        assert!(!oracle.is_excluded("internal/domain/user.go"));
    }

    #[test]
    fn from_config_copies_analyzer_settings() {
        let config = AnalyzerConfig {
            include_tests: false,
            ..AnalyzerConfig::default()
        };
        let oracle = GoSourceOracle::from_config(&config);
        assert!(!oracle.include_tests);
        assert!(oracle.is_excluded("a/testdata/fixture.go"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = GoSourceOracle::new()
            .load(Path::new("/definitely/not/a/go/tree"))
            .unwrap_err();
        assert!(matches!(err, OracleError::MissingRoot { .. }));
    }
}
