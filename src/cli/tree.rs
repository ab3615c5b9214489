//! Display the inclusion tree of a single page.
//!
//! ```text
//! $ jsp-insights tree USBC/ShoppingArea/Cart.jsp --depth 2
//! /srv/Stores/WebContent/USBC/ShoppingArea/Cart.jsp
//! ├── /srv/Stores/WebContent/USBC/include/Header.jspf
//! │   └── /srv/Stores/WebContent/companyGLOBALSAS/include/Logo.jsp
//! └── /srv/Stores/WebContent/USBC/ShoppingArea/Cart.jsp (circular, first included at depth 0)
//! ```

use anyhow::{Result, anyhow};
use clap::Args;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use super::common::CommandContext;
use crate::core::InsightsError;
use crate::graph::DeepGraphResolver;
use crate::output::render_tree;
use crate::utils::{join_page_path, normalize_page_path, page_path_from};

/// Print the resolved inclusion tree of one page.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Page to resolve: a file path, an absolute page path, or a path relative
    /// to the content root
    page: String,

    /// Maximum depth to display (unlimited if not specified)
    #[arg(short = 'd', long)]
    depth: Option<usize>,

    /// Output format (tree, json)
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,

    /// Read raw records from this file instead of walking the stores directory
    #[arg(long, value_name = "FILE")]
    records: Option<PathBuf>,
}

impl TreeCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        self.validate_arguments()?;

        let records = ctx.records(self.records.as_deref()).await?;
        let shallow = ctx.shallow_nodes(records).await?;
        let resolver = DeepGraphResolver::new(&shallow);
        let content_root = ctx.content_root().await;

        let key = self
            .candidate_keys(&content_root)
            .into_iter()
            .find(|candidate| resolver.lookup(candidate).is_some())
            .ok_or_else(|| InsightsError::PageNotFound {
                path: self.page.clone(),
            })?;
        let tree = resolver.resolve_one(&key)?;

        match self.format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&tree)?),
            _ => print!("{}", render_tree(&tree, self.depth, std::io::stdout().is_terminal())),
        }
        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "tree" | "json" => {}
            _ => {
                return Err(InsightsError::InvalidFormat {
                    format: self.format.clone(),
                }
                .into());
            }
        }

        if self.depth == Some(0) {
            return Err(anyhow!("Depth must be at least 1"));
        }

        Ok(())
    }

    /// Page keys to try, most specific first.
    fn candidate_keys(&self, content_root: &str) -> Vec<String> {
        let mut keys = Vec::with_capacity(3);
        if let Ok(canonical) = Path::new(&self.page).canonicalize() {
            keys.push(page_path_from(&canonical));
        }
        keys.push(normalize_page_path(&self.page));
        keys.push(join_page_path(content_root, &self.page));
        keys
    }
}
