//! File-system analyzer: discovery, parsing and rule evaluation.

use crate::config::Config;
use crate::context::FileContext;
use crate::engine::RuleEngine;
use crate::extract;
use crate::model::SourceFile;
use crate::rule::Settings;
use crate::types::AuditResult;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Error parsing Rust source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
///
/// Values set directly on the builder win over the ones from
/// [`AnalyzerBuilder::config`].
#[derive(Debug, Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    settings: Option<Settings>,
    package: Option<String>,
    exclude_patterns: Vec<String>,
    respect_gitignore: Option<bool>,
    fail_on_parse_error: Option<bool>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the rules to run.
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Sets the package name prepended to module paths.
    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets whether to respect .gitignore files (default: true).
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = Some(respect);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = Some(fail);
        self
    }

    /// Sets the configuration: analyzer options and rule sections.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule configuration is invalid, an exclude
    /// pattern is not a valid glob, or the working directory is unavailable.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let settings = match self.settings {
            Some(settings) => settings,
            None => config.to_settings()?,
        };

        // Merge exclude patterns from config
        let exclude_patterns = self
            .exclude_patterns
            .iter()
            .chain(&config.analyzer.exclude)
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            settings,
            package: self.package.unwrap_or(config.analyzer.package),
            exclude_patterns,
            respect_gitignore: self
                .respect_gitignore
                .unwrap_or(config.analyzer.respect_gitignore),
            fail_on_parse_error: self
                .fail_on_parse_error
                .unwrap_or(config.analyzer.fail_on_parse_error),
        })
    }
}

/// Walks a source tree and audits every non-test Rust file.
///
/// Use [`Analyzer::builder()`] to construct an instance.
#[derive(Debug)]
pub struct Analyzer {
    root: PathBuf,
    settings: Settings,
    package: String,
    exclude_patterns: Vec<glob::Pattern>,
    respect_gitignore: bool,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the rules this analyzer runs.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the number of configured rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.settings.rule_count()
    }

    /// Analyzes all files and returns the results.
    ///
    /// Diagnostics follow file path order, then document order within a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file
    /// fails to parse while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<AuditResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let engine = RuleEngine::new(&self.settings);
        let mut result = AuditResult::new();
        let files = self.discover_files()?;

        info!(
            "Found {} files to analyze with {} rules",
            files.len(),
            self.rule_count()
        );

        for path in &files {
            let content = std::fs::read_to_string(path)?;
            let ctx = FileContext::new(path, &content, &self.root, &self.package);

            if ctx.is_test {
                trace!("Skipping test file: {}", ctx.relative_path.display());
                result.files_skipped += 1;
                continue;
            }

            debug!("Analyzing: {} ({})", ctx.relative_path.display(), ctx.package);
            match extract::parse_source(&ctx) {
                Ok(file) => {
                    result.diagnostics.extend(engine.check_file(&file));
                    result.files_checked += 1;
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse {
                            path: path.clone(),
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            "Analysis complete: {} diagnostics in {} files ({} test files skipped)",
            result.diagnostics.len(),
            result.files_checked,
            result.files_skipped
        );

        Ok(result)
    }

    /// Discovers all Rust source files to analyze, sorted by path.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || path.extension().map_or(true, |ext| ext != "rs") {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path matches an exclude pattern, either relative to the
    /// root or as given.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
    }
}

/// Audits source text that is already in memory.
///
/// `path` is reported in diagnostics and decides both the package path
/// (below `package`) and whether the file is a test file.
///
/// # Errors
///
/// Returns [`AnalyzerError::Parse`] if `source` is not valid Rust.
pub fn audit_source(
    settings: &Settings,
    path: &Path,
    package: &str,
    source: &str,
) -> Result<AuditResult, AnalyzerError> {
    let ctx = FileContext::new(path, source, Path::new(""), package);
    let file = if ctx.is_test {
        SourceFile::new(path)
    } else {
        extract::parse_source(&ctx).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };
    Ok(RuleEngine::new(settings).audit(std::iter::once(&file)))
}
