//! Configuration file lookup.
//!
//! First match wins:
//!
//! 1. `--config` flag, taken as-is
//! 2. `doc-audit.toml`, `.doc-audit.toml` or `doc-audit.json` in the project
//! 3. `config.toml` or `config.json` in `$DOC_AUDIT_CONFIG_DIR`, else in
//!    `~/.doc-audit/`
//! 4. nothing: defaults, which means no rules

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the user-wide config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config came from the user-wide directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["doc-audit.toml", ".doc-audit.toml", "doc-audit.json"];

const GLOBAL_CONFIG_NAMES: &[&str] = &["config.toml", "config.json"];

/// Resolves the configuration file for a project directory.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir().as_deref())
}

fn resolve_in(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = first_existing(project_dir, PROJECT_CONFIG_NAMES) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(found) = global_dir.and_then(|dir| first_existing(dir, GLOBAL_CONFIG_NAMES)) {
        tracing::debug!("Found global config: {}", found.display());
        return ConfigSource::Global(found);
    }

    ConfigSource::Default
}

fn first_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|name| dir.join(name)).find(|p| p.is_file())
}

/// The user-wide config directory: `$DOC_AUDIT_CONFIG_DIR`, else `~/.doc-audit/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("DOC_AUDIT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".doc-audit")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn explicit_wins_even_if_missing() {
        let project = TempDir::new().unwrap();
        touch(project.path(), "doc-audit.toml");

        let explicit = Path::new("/nonexistent/custom.toml");
        assert_eq!(
            resolve_in(project.path(), Some(explicit), None),
            ConfigSource::Explicit(explicit.to_path_buf())
        );
    }

    #[test]
    fn project_names_are_checked_in_order() {
        let project = TempDir::new().unwrap();
        let json = touch(project.path(), "doc-audit.json");
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(json)
        );

        let dotted = touch(project.path(), ".doc-audit.toml");
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(dotted)
        );

        let plain = touch(project.path(), "doc-audit.toml");
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(plain)
        );
    }

    #[test]
    fn global_is_a_fallback_only() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let global_config = touch(global.path(), "config.toml");

        let result = resolve_in(project.path(), None, Some(global.path()));
        assert_eq!(result, ConfigSource::Global(global_config));
        assert!(result.is_global());

        touch(project.path(), "doc-audit.toml");
        let result = resolve_in(project.path(), None, Some(global.path()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn global_json_is_accepted() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let json = touch(global.path(), "config.json");
        assert_eq!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Global(json)
        );
    }

    #[test]
    fn directories_are_not_configs() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("doc-audit.toml")).unwrap();
        assert_eq!(resolve_in(project.path(), None, None), ConfigSource::Default);
    }

    #[test]
    fn nothing_found_means_defaults() {
        let project = TempDir::new().unwrap();
        let empty_global = TempDir::new().unwrap();
        let result = resolve_in(project.path(), None, Some(empty_global.path()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
        assert!(!result.is_global());
    }
}
