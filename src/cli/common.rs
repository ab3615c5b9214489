//! Shared plumbing for the scan commands.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tokio::fs;

use crate::config::InsightsConfig;
use crate::core::InsightsError;
use crate::extractor::ReferenceExtractor;
use crate::graph::{RawFileRecord, ShallowGraphBuilder, ShallowNode};
use crate::resolver::PathResolver;
use crate::utils::page_path_from;
use crate::walker;

/// Resolved run settings handed to every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Effective configuration after command-line overrides.
    pub config: InsightsConfig,
    /// Suppress result lines on stdout.
    pub quiet: bool,
}

impl CommandContext {
    #[must_use]
    pub const fn new(config: InsightsConfig, quiet: bool) -> Self {
        Self {
            config,
            quiet,
        }
    }

    /// Raw file records, read from a previous `raw` run when `from` is given,
    /// otherwise walked from the stores directory.
    pub async fn records(&self, from: Option<&Path>) -> Result<Vec<RawFileRecord>> {
        match from {
            Some(path) => load_records(path).await,
            None => walker::scan(self.config.stores_dir.clone(), self.config.layout.clone()).await,
        }
    }

    /// Absolute, normalized content root.
    ///
    /// Canonicalized when it exists so it matches the canonical paths produced
    /// by the directory walk.
    pub async fn content_root(&self) -> String {
        let root = self.config.content_root();
        let absolute = match fs::canonicalize(&root).await {
            Ok(canonical) => canonical,
            Err(_) => std::path::absolute(&root).unwrap_or(root),
        };
        page_path_from(&absolute)
    }

    /// Path resolver for the configured layout.
    pub async fn resolver(&self) -> PathResolver {
        PathResolver::new(self.content_root().await, self.config.layout.clone())
    }

    /// Shallow node collection for `records`.
    pub async fn shallow_nodes(&self, records: Vec<RawFileRecord>) -> Result<Vec<ShallowNode>> {
        let extractor = ReferenceExtractor::new(self.resolver().await)?;
        let builder = ShallowGraphBuilder::new(extractor, self.config.concurrency());
        Ok(builder.build_all(records).await)
    }

    /// Print a success line unless running quietly.
    pub fn report(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message.as_ref());
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }
}

/// Load records previously written to `jsp.json`.
pub async fn load_records(path: &Path) -> Result<Vec<RawFileRecord>> {
    let content = fs::read_to_string(path).await.map_err(|source| InsightsError::FileSystemError {
        operation: "read".to_string(),
        path: path.display().to_string(),
        source,
    })?;
    let records = serde_json::from_str(&content).map_err(InsightsError::from)?;
    Ok(records)
}

