//! # doc-audit-core
//!
//! Documentation auditing for Rust sources based on `syn` AST analysis.
//!
//! This crate measures how well declarations are documented:
//!
//! - [`Rule`]s pair package [`Target`]s with one check
//! - the comment density check flags long functions with too few comments
//! - the presence checks flag traits and structs (and their members)
//!   without doc comments
//! - [`RuleEngine`] applies every matching rule to every declaration
//! - [`Analyzer`] walks a source tree, skipping test files
//!
//! ## Example
//!
//! ```ignore
//! use doc_audit_core::{Analyzer, Config};
//!
//! let config = Config::from_file("doc-audit.toml".as_ref())?;
//! let analyzer = Analyzer::builder()
//!     .root("./")
//!     .config(config)
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for diagnostic in &result.diagnostics {
//!     println!("{diagnostic}");
//! }
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod engine;
mod rule;
mod types;

pub mod checks;
pub mod comments;
pub mod extract;
pub mod model;
pub mod settings;
pub mod target;

pub use analyzer::{audit_source, Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError};
pub use context::{is_test_file, package_path, FileContext, DEFAULT_PACKAGE};
pub use engine::RuleEngine;
pub use rule::{Check, Rule, RuleSet, Settings};
pub use target::Target;
pub use types::{AuditResult, Diagnostic, DiagnosticReport, Location};
