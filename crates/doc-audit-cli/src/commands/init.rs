//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# doc-audit configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "."

# Package name prepended to module paths: src/domain/user.rs -> crate::domain::user
package = "crate"

# Glob patterns to exclude from analysis
exclude = [
    "**/target/**",
]

# Respect .gitignore files
respect_gitignore = true

# Abort when a file is not valid Rust instead of skipping it
fail_on_parse_error = false

# Targets select declarations by package path prefix.
# Every rule whose targets match a declaration runs; rules do not override each other.

# Functions of at least `min_lines_of_code` lines need `min_comment_density`
# percent of comment lines.
[[functions]]
targets = [{ packages = ["crate"] }]
params = { min_comment_density = 10, min_lines_of_code = 10 }

# Traits need a doc comment, and so does each of their methods.
[[interfaces]]
targets = [{ packages = ["crate"] }]
params = { require_headline_comment = true, require_method_comment = true }

# Structs need a doc comment; fields are optional.
[[structs]]
targets = [{ packages = ["crate"] }]
params = { require_headline_comment = true, require_field_comment = false }
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("doc-audit.toml"), force)?;

    println!("Created doc-audit.toml");
    println!("\nNext steps:");
    println!("  1. Edit doc-audit.toml to target your packages");
    println!("  2. Run: doc-audit check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
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
    use doc_audit_core::Config;
    use tempfile::TempDir;

    #[test]
    fn starter_config_is_valid() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        let settings = config.to_settings().unwrap();
        assert_eq!(settings.rule_count(), 3);
        assert_eq!(config.analyzer.package, "crate");
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc-audit.toml");
        std::fs::write(&path, "# mine").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
