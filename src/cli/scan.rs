//! The `raw`, `shallow` and `deep` commands.
//!
//! Each command runs the pipeline up to its own stage and writes that stage's
//! output file into the output directory:
//!
//! ```text
//! raw      walk                          -> jsp.json
//! shallow  walk -> extract               -> shallow.json
//! deep     walk -> extract -> expand     -> shallow.json, deep.json
//! ```
//!
//! `shallow` and `deep` can start from an existing `jsp.json` with `--records`.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::common::CommandContext;
use crate::constants::{DEEP_OUTPUT_FILE, RAW_OUTPUT_FILE, SHALLOW_OUTPUT_FILE};
use crate::graph::{DeepGraphResolver, GraphSummary};
use crate::output::write_json;

/// Walk the stores directory and write the raw file records.
#[derive(Args, Debug)]
pub struct RawCommand {}

impl RawCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let records = ctx.records(None).await?;
        let path = write_json(ctx.output_dir(), RAW_OUTPUT_FILE, &records).await?;
        ctx.report(format!("{} page(s) written to {}", records.len(), path.display()));
        Ok(())
    }
}

/// Extract the direct references of every page.
#[derive(Args, Debug)]
pub struct ShallowCommand {
    /// Read raw records from this file instead of walking the stores directory
    #[arg(long, value_name = "FILE")]
    records: Option<PathBuf>,
}

impl ShallowCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let records = ctx.records(self.records.as_deref()).await?;
        let nodes = ctx.shallow_nodes(records).await?;
        let path = write_json(ctx.output_dir(), SHALLOW_OUTPUT_FILE, &nodes).await?;
        ctx.report(format!("{} page(s) written to {}", nodes.len(), path.display()));
        Ok(())
    }
}

/// Resolve every page into its full inclusion tree.
#[derive(Args, Debug)]
pub struct DeepCommand {
    /// Read raw records from this file instead of walking the stores directory
    #[arg(long, value_name = "FILE")]
    records: Option<PathBuf>,

    /// Print the graph summary as JSON on stdout
    #[arg(long)]
    summary: bool,
}

impl DeepCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let records = ctx.records(self.records.as_deref()).await?;
        let shallow = ctx.shallow_nodes(records).await?;
        write_json(ctx.output_dir(), SHALLOW_OUTPUT_FILE, &shallow).await?;

        info!("Resolving inclusion trees for {} page(s)", shallow.len());
        let deep = DeepGraphResolver::new(&shallow).resolve_all();
        let path = write_json(ctx.output_dir(), DEEP_OUTPUT_FILE, &deep).await?;

        let summary = GraphSummary::from_graph(&shallow, &deep);
        info!("{summary}");

        if self.summary {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            ctx.report(format!("{} tree(s) written to {}", deep.len(), path.display()));
        }
        Ok(())
    }
}
