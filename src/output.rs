//! Output files and text rendering of inclusion trees.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::core::InsightsError;
use crate::graph::DeepNode;

/// Write `records` as a pretty-printed JSON array to `dir/file_name`.
///
/// The directory is created if needed. Returns the path written.
///
/// # Errors
///
/// Returns [`InsightsError::FileSystemError`] if the directory or file cannot be
/// written, or [`InsightsError::JsonError`] if serialization fails.
pub async fn write_json<T: Serialize>(dir: &Path, file_name: &str, records: &[T]) -> Result<PathBuf> {
    fs::create_dir_all(dir).await.map_err(|source| InsightsError::FileSystemError {
        operation: "create directory".to_string(),
        path: dir.display().to_string(),
        source,
    })?;

    let path = dir.join(file_name);
    let json = serde_json::to_string_pretty(records).map_err(InsightsError::from)?;
    fs::write(&path, json).await.map_err(|source| InsightsError::FileSystemError {
        operation: "write".to_string(),
        path: path.display().to_string(),
        source,
    })?;

    info!("Wrote {} record(s) to {}", records.len(), path.display());
    Ok(path)
}

/// Render a tree with box-drawing connectors, one occurrence per line.
///
/// Occurrences deeper than `max_depth` are omitted. Circular occurrences carry a
/// `(circular, first included at depth k)` suffix.
#[must_use]
pub fn render_tree(root: &DeepNode, max_depth: Option<usize>, colorize: bool) -> String {
    let mut out = String::new();
    let label = if colorize { root.path.cyan().bold().to_string() } else { root.path.clone() };
    out.push_str(&label);
    out.push('\n');

    let renderer = TreeRenderer {
        max_depth,
        colorize,
    };
    renderer.children(root, "", &mut out);
    out
}

struct TreeRenderer {
    max_depth: Option<usize>,
    colorize: bool,
}

impl TreeRenderer {
    fn children(&self, node: &DeepNode, prefix: &str, out: &mut String) {
        if self.max_depth.is_some_and(|max| node.depth >= max) {
            return;
        }

        for (i, child) in node.nested.iter().enumerate() {
            let is_last = i == node.nested.len() - 1;
            let connector = if is_last { "└── " } else { "├── " };

            out.push_str(prefix);
            out.push_str(connector);
            out.push_str(&self.label(child));
            out.push('\n');

            let child_prefix = if is_last { format!("{prefix}    ") } else { format!("{prefix}│   ") };
            self.children(child, &child_prefix, out);
        }
    }

    fn label(&self, node: &DeepNode) -> String {
        let Some(marker) = &node.circular else {
            return node.path.clone();
        };

        let suffix = format!("(circular, first included at depth {})", marker.first_included_depth);
        if self.colorize {
            format!("{} {}", node.path.yellow(), suffix.bright_black())
        } else {
            format!("{} {suffix}", node.path)
        }
    }
}
