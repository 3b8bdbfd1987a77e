//! Configuration types for doc-audit.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::context::DEFAULT_PACKAGE;
use crate::rule::Settings;
use crate::settings::dto::{FunctionRuleDto, InterfaceRuleDto, SettingsDto, StructRuleDto};
use crate::settings::loader::{self, LoadError};

/// Top-level configuration for doc-audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Comment density rules.
    #[serde(default, alias = "Functions")]
    pub functions: Vec<FunctionRuleDto>,

    /// Trait documentation rules.
    #[serde(default, alias = "Interfaces")]
    pub interfaces: Vec<InterfaceRuleDto>,

    /// Struct documentation rules.
    #[serde(default, alias = "Structs")]
    pub structs: Vec<StructRuleDto>,
}

impl Config {
    /// Loads configuration from a file.
    ///
    /// Files ending in `.json` are read as JSON, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::parse_json(&content)
        } else {
            Self::parse(&content)
        }
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// The rule sections as a settings DTO.
    #[must_use]
    pub fn settings_dto(&self) -> SettingsDto {
        SettingsDto {
            functions: self.functions.clone(),
            interfaces: self.interfaces.clone(),
            structs: self.structs.clone(),
        }
    }

    /// Validates the rule sections and builds the immutable [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid parameter block.
    pub fn to_settings(&self) -> Result<Settings, ConfigError> {
        Ok(loader::load(self.settings_dto())?)
    }

    /// Whether at least one rule is configured.
    #[must_use]
    pub fn has_rules(&self) -> bool {
        !self.settings_dto().is_empty()
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Package name prepended to module paths (default: `crate`).
    #[serde(default = "default_package")]
    pub package: String,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Whether a file that fails to parse aborts the run.
    #[serde(default)]
    pub fail_on_parse_error: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            package: default_package(),
            exclude: default_exclude(),
            respect_gitignore: true,
            fail_on_parse_error: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_package() -> String {
    DEFAULT_PACKAGE.to_string()
}

fn default_exclude() -> Vec<String> {
    vec!["**/target/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Rule parameters failed validation.
    #[error("Invalid rule configuration: {0}")]
    Invalid(#[from] LoadError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(!config.analyzer.fail_on_parse_error);
        assert_eq!(config.analyzer.package, "crate");
        assert!(!config.has_rules());
        assert!(config.to_settings().unwrap().is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./shop"
package = "shop"
exclude = ["**/generated/**"]

[[functions]]
targets = [{ packages = ["shop::domain"] }]
params = { min_comment_density = 20, min_lines_of_code = 5 }

[[structs]]
targets = [{ packages = ["shop"] }]
params = { require_headline_comment = true }
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./shop"));
        assert_eq!(config.analyzer.package, "shop");
        assert_eq!(config.analyzer.exclude, vec!["**/generated/**"]);
        assert!(config.has_rules());

        let settings = config.to_settings().unwrap();
        assert_eq!(settings.functions().len(), 1);
        assert_eq!(settings.structs().len(), 1);
        assert!(settings.interfaces().is_empty());
    }

    #[test]
    fn test_invalid_params_surface_on_conversion() {
        let config = Config::parse("[[functions]]\nparams = { min_comment_density = 150 }").unwrap();
        let err = config.to_settings().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("functions[0].params"));
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("settings.json");
        let mut json = std::fs::File::create(&json_path).unwrap();
        write!(
            json,
            r#"{{"functions": [{{"targets": [{{"packages": ["crate"]}}], "params": {{"minCommentDensity": 30}}}}]}}"#
        )
        .unwrap();
        let config = Config::from_file(&json_path).unwrap();
        assert_eq!(config.functions[0].params.min_comment_density, 30);
        assert_eq!(config.analyzer, AnalyzerConfig::default());

        let toml_path = dir.path().join("doc-audit.toml");
        std::fs::write(&toml_path, "[analyzer]\nfail_on_parse_error = true\n").unwrap();
        let config = Config::from_file(&toml_path).unwrap();
        assert!(config.analyzer.fail_on_parse_error);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::from_file(Path::new("/nonexistent/doc-audit.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
