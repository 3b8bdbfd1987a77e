//! doc-audit CLI tool.
//!
//! Usage:
//! ```bash
//! doc-audit check [OPTIONS] [PATH]
//! doc-audit rules
//! doc-audit init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Documentation auditor for Rust projects: comment density and doc presence
#[derive(Parser)]
#[command(name = "doc-audit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit documentation
    Check {
        /// Path to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Package name prepended to module paths (default from config, else "crate")
        #[arg(short, long)]
        package: Option<String>,
    },

    /// Show the configured rules
    Rules {
        /// Project directory used to locate the configuration
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for audit results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// One-line-per-diagnostic compact format.
    Compact,
    /// JSON output.
    Json,
    /// Source snippets rendered by miette.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            exclude,
            package,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            let found = commands::check::run(&path, format, exclude, package, &source)?;
            if found {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Rules { path } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::rules::run(&source)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
