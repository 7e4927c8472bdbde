//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# archtest configuration
# Run `archtest list-patterns` for every built-in pattern and its keys.

# Lowest severity that makes `archtest check` exit non-zero: error | warning | info
fail_on = "error"

[analyzer]
# Go source root, relative to this file
root = "."

# Glob patterns (relative to root) to skip
exclude = [
    "**/vendor/**",
    "**/testdata/**",
]

# Whether _test.go files contribute types
include_tests = true

[[patterns]]
kind = "clean"
domain = "internal/domain"
application = "internal/application"
infrastructure = "internal/infrastructure"
presentation = "internal/presentation"

# [[patterns]]
# kind = "ddd"
# contexts = ["user", "order"]
# shared = "internal/shared"
# severity = "warning"

# [[rules]]
# name = "services-are-structs"
# that = { resides_in_namespace = "internal/application", have_name_ending_with = "Service" }
# should = { be_struct = true }
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_default(Path::new("archtest.toml"), force)?;

    println!("Created archtest.toml");
    println!("\nNext steps:");
    println!("  1. Edit archtest.toml to describe your architecture");
    println!("  2. Run: archtest check");

    Ok(())
}

fn write_default(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_loadable() {
        let config = archtest_core::Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.analyzer.include_tests);
        let patterns =
            archtest_patterns::declarative::load_patterns_from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].pattern.rules().len(), 6);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("archtest.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_default(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_default(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("kind = \"clean\""));
    }
}
