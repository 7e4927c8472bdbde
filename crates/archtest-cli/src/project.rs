//! Config lookup, configured patterns and analysis root for one invocation.
//!
//! The config file is the first of:
//!
//! 1. `--config` (or `$ARCHTEST_CONFIG`)
//! 2. `archtest.toml` or `.archtest.toml` in the project directory
//! 3. `config.toml` in `$ARCHTEST_CONFIG_DIR`, else in `~/.archtest/`
//!
//! With none of them, nothing is configured and the project directory is
//! analyzed as is.

use anyhow::{Context, Result};
use archtest_core::{Config, Universe};
use archtest_go::GoSourceOracle;
use archtest_patterns::declarative::{load_patterns_from_toml, ConfiguredPattern};
use std::path::{Path, PathBuf};

/// Config file names looked up in the project directory, in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["archtest.toml", ".archtest.toml"];

/// Where the config came from.
///
/// A local config anchors `[analyzer] root` at its own directory; a shared
/// global one leaves the project directory as the analysis root.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigLocation {
    Local(PathBuf),
    Global(PathBuf),
    None,
}

impl ConfigLocation {
    fn find(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> Self {
        if let Some(p) = explicit {
            return Self::Local(p.to_path_buf());
        }
        if let Some(found) = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| project_dir.join(name))
            .find(|p| p.exists())
        {
            tracing::debug!("Found project config: {}", found.display());
            return Self::Local(found);
        }
        global_dir
            .map(|dir| dir.join("config.toml"))
            .filter(|p| p.exists())
            .map_or(Self::None, Self::Global)
    }
}

fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("ARCHTEST_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".archtest")))
}

/// Configuration, configured patterns, and the directory to analyze.
pub struct Project {
    /// Parsed `[analyzer]` table and `fail_on`.
    pub config: Config,
    /// Every `[[patterns]]` and `[[rules]]` entry.
    pub patterns: Vec<ConfiguredPattern>,
    /// Directory handed to the source oracle.
    pub root: PathBuf,
}

impl Project {
    /// Finds and loads the config for `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read, or if it or any
    /// pattern it declares is invalid.
    pub fn discover(project_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let location =
            ConfigLocation::find(project_dir, explicit, global_config_dir().as_deref());
        Self::load(project_dir, &location)
    }

    fn load(project_dir: &Path, location: &ConfigLocation) -> Result<Self> {
        let path = match location {
            ConfigLocation::Local(p) => p,
            ConfigLocation::Global(p) => {
                tracing::info!("Using global config: {}", p.display());
                p
            }
            ConfigLocation::None => {
                return Ok(Self {
                    config: Config::default(),
                    patterns: Vec::new(),
                    root: project_dir.to_path_buf(),
                });
            }
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Config::parse(&content)
            .map_err(|e| anyhow::anyhow!("{:?}", miette::Report::new(e)))
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        let patterns = load_patterns_from_toml(&content)
            .map_err(|e| anyhow::anyhow!("{:?}", miette::Report::new(e)))
            .with_context(|| format!("Invalid patterns in {}", path.display()))?;

        let root = match location {
            ConfigLocation::Local(p) => p
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .join(&config.analyzer.root),
            ConfigLocation::Global(_) | ConfigLocation::None => project_dir.to_path_buf(),
        };

        Ok(Self {
            config,
            patterns,
            root,
        })
    }

    /// Oracle configured from `[analyzer]` plus extra exclusions.
    #[must_use]
    pub fn oracle(&self, extra_exclude: &[String]) -> GoSourceOracle {
        GoSourceOracle::from_config(&self.config.analyzer).exclude(extra_exclude)
    }

    /// Extracts every type under the analysis root.
    #[must_use]
    pub fn universe(&self, extra_exclude: &[String]) -> Universe {
        Universe::build(&self.oracle(extra_exclude), &self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MVC: &str =
        "[analyzer]\nroot = \"backend\"\n\n[[patterns]]\nkind = \"mvc\"\nmodel = \"m\"\nview = \"v\"\ncontroller = \"c\"\n";

    #[test]
    fn explicit_config_wins_without_existence_check() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("archtest.toml"), "").unwrap();
        let explicit = Path::new("/nonexistent/custom.toml");
        assert_eq!(
            ConfigLocation::find(tmp.path(), Some(explicit), None),
            ConfigLocation::Local(explicit.to_path_buf())
        );
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".archtest.toml"), "").unwrap();
        assert_eq!(
            ConfigLocation::find(tmp.path(), None, None),
            ConfigLocation::Local(tmp.path().join(".archtest.toml"))
        );
        fs::write(tmp.path().join("archtest.toml"), "").unwrap();
        assert_eq!(
            ConfigLocation::find(tmp.path(), None, None),
            ConfigLocation::Local(tmp.path().join("archtest.toml"))
        );
    }

    #[test]
    fn global_config_needs_its_file() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        assert_eq!(
            ConfigLocation::find(project.path(), None, Some(global.path())),
            ConfigLocation::None
        );
        fs::write(global.path().join("config.toml"), "").unwrap();
        assert_eq!(
            ConfigLocation::find(project.path(), None, Some(global.path())),
            ConfigLocation::Global(global.path().join("config.toml"))
        );
    }

    #[test]
    fn no_config_analyzes_project_dir() {
        let project = Project::load(Path::new("svc"), &ConfigLocation::None).unwrap();
        assert_eq!(project.root, PathBuf::from("svc"));
        assert!(project.patterns.is_empty());
    }

    #[test]
    fn local_root_is_relative_to_config() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("archtest.toml");
        fs::write(&config, MVC).unwrap();

        let project = Project::load(Path::new("ignored"), &ConfigLocation::Local(config)).unwrap();
        assert_eq!(project.root, tmp.path().join("backend"));
        assert_eq!(project.patterns.len(), 1);
    }

    #[test]
    fn global_config_keeps_project_dir_as_root() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("config.toml");
        fs::write(&config, MVC).unwrap();

        let project = Project::load(Path::new("svc"), &ConfigLocation::Global(config)).unwrap();
        assert_eq!(project.root, PathBuf::from("svc"));
        assert_eq!(project.patterns.len(), 1);
    }

    #[test]
    fn invalid_pattern_is_reported_with_path() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("archtest.toml");
        fs::write(&config, "[[patterns]]\nkind = \"clean\"\n").unwrap();

        let err = Project::discover(tmp.path(), Some(&config)).err().unwrap();
        assert!(err.to_string().contains("Invalid patterns"));
    }
}
