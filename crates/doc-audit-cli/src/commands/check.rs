//! Check command implementation.

use anyhow::{Context, Result};
use doc_audit_core::Analyzer;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `true` when at least one diagnostic was produced.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    package: Option<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let config = super::load_config(source)?;
    if !config.has_rules() {
        tracing::warn!("No rules configured; run `doc-audit init` to create a starter config");
    }

    let mut builder = Analyzer::builder().root(path).config(config).excludes(exclude);
    if let Some(package) = package {
        builder = builder.package(package);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, analyzer.root(), format)?;

    Ok(result.has_diagnostics())
}
