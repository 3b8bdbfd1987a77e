//! Shared output formatting for audit results.

use anyhow::Result;
use doc_audit_core::{AuditResult, DiagnosticReport};
use miette::{NamedSource, Report};
use std::path::Path;

use crate::OutputFormat;

/// Print audit results in the specified format.
///
/// `root` resolves the relative diagnostic paths for source snippets.
pub fn print(result: &AuditResult, root: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Pretty => print_pretty(result, root),
    }
    Ok(())
}

fn print_text(result: &AuditResult) {
    for diagnostic in &result.diagnostics {
        println!(
            "{} at {}:{}:{}",
            diagnostic.rule,
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column,
        );
        println!("  \x1b[33mdoc\x1b[0m: {}", diagnostic.message);
        println!();
    }

    let summary_color = if result.has_diagnostics() {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!("{}{}\x1b[0m", summary_color, result.summary());
}

fn print_json(result: &AuditResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &AuditResult) {
    for diagnostic in &result.diagnostics {
        println!("{diagnostic}");
    }
}

fn print_pretty(result: &AuditResult, root: &Path) {
    for diagnostic in &result.diagnostics {
        let file = root.join(&diagnostic.location.file);
        let report = Report::new(DiagnosticReport::from(diagnostic));
        let report = match std::fs::read_to_string(&file) {
            Ok(content) => report.with_source_code(NamedSource::new(
                diagnostic.location.file.display().to_string(),
                content,
            )),
            Err(e) => {
                tracing::debug!("No source for {}: {}", file.display(), e);
                report
            }
        };
        eprintln!("{report:?}");
    }
    println!("{}", result.summary());
}
