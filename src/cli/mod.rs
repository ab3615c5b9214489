//! Command-line interface for JSP Insights.
//!
//! # Available Commands
//!
//! - `raw` - walk the stores directory and write `jsp.json`
//! - `shallow` - extract direct references and write `shallow.json`
//! - `deep` - resolve inclusion trees and write `shallow.json` and `deep.json`
//! - `tree` - print the inclusion tree of one page
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only, no result lines
//! - `--config` / `-c` - configuration file (default `jsp-insights.toml`)
//! - `--stores-dir` - override `stores_dir` from the configuration
//! - `--output-dir` / `-o` - override `output_dir` from the configuration
//!
//! Logs go to stderr so that `tree --format json` output can be piped.
//!
//! # Examples
//!
//! ```bash
//! jsp-insights deep --stores-dir ../WebCommerce/Stores
//! jsp-insights shallow --records processor-output/jsp.json
//! jsp-insights tree USBC/ShoppingArea/Cart.jsp --depth 3
//! RUST_LOG=jsp_insights=trace jsp-insights deep
//! ```

pub mod common;
mod scan;
mod tree;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::InsightsConfig;
use common::CommandContext;

/// Settings derived from the global flags before any command runs.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Explicit log filter; `None` defers to `RUST_LOG`, then `info`.
    pub log_level: Option<String>,

    pub quiet: bool,

    pub config_path: Option<PathBuf>,

    pub stores_dir: Option<PathBuf>,

    pub output_dir: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut InsightsConfig) {
        if let Some(stores_dir) = &self.stores_dir {
            config.stores_dir.clone_from(stores_dir);
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir.clone_from(output_dir);
        }
    }
}

#[derive(Parser)]
#[command(
    name = "jsp-insights",
    about = "Inventory a JSP template tree and resolve its inclusion graph",
    version,
    long_about = "JSP Insights walks a store tree of .jsp/.jspf pages, extracts the pages each one \
                  includes, and expands those references into cycle-safe inclusion trees."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors and suppress result lines
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to walk for template files
    #[arg(long, global = true, value_name = "DIR")]
    stores_dir: Option<PathBuf>,

    /// Directory receiving the output files
    #[arg(short, long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the stores directory and write jsp.json
    Raw(scan::RawCommand),

    /// Extract direct references and write shallow.json
    Shallow(scan::ShallowCommand),

    /// Resolve inclusion trees and write shallow.json and deep.json
    Deep(scan::DeepCommand),

    /// Print the inclusion tree of one page
    Tree(tree::TreeCommand),
}

impl Cli {
    /// Initialize logging and run the selected command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        init_logging(config.log_level.as_deref());
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            quiet: self.quiet,
            config_path: self.config.clone(),
            stores_dir: self.stores_dir.clone(),
            output_dir: self.output_dir.clone(),
        }
    }

    /// Run the selected command with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let mut settings = InsightsConfig::load_with_optional(config.config_path.clone()).await?;
        config.apply_to(&mut settings);
        let ctx = CommandContext::new(settings, config.quiet);

        match self.command {
            Commands::Raw(cmd) => cmd.execute(&ctx).await,
            Commands::Shallow(cmd) => cmd.execute(&ctx).await,
            Commands::Deep(cmd) => cmd.execute(&ctx).await,
            Commands::Tree(cmd) => cmd.execute(&ctx).await,
        }
    }
}

/// Install the global `tracing` subscriber writing to stderr.
///
/// An explicit level wins; otherwise `RUST_LOG` is used, falling back to `info`.
/// Calling this more than once is harmless.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
