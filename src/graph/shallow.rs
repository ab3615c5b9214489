//! First-order reference extraction over the whole corpus.
//!
//! Each [`RawFileRecord`] becomes exactly one [`ShallowNode`], even when its
//! content cannot be read: the node is still emitted with an empty `nested` list
//! so that it can be looked up (and reported as a leaf) during deep resolution.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::extractor::ReferenceExtractor;
use crate::resolver::PageContext;
use crate::utils::{normalize_page_path, page_dir};

/// One template file discovered on disk.
///
/// Size and timestamps are carried through to `jsp.json` untouched; the graph
/// builders only look at `path`, `root` and `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFileRecord {
    /// Canonical absolute path of the file.
    pub path: String,
    /// Directory containing the file.
    pub root: String,
    /// File name including extension.
    pub name: String,
    /// File size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Last modification time, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Creation time, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl RawFileRecord {
    /// Record for `path` with root and name derived lexically and no metadata.
    pub fn from_path(path: impl AsRef<str>) -> Self {
        let path = normalize_page_path(path.as_ref());
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            root: page_dir(&path),
            name,
            path,
            size: 0,
            modified: None,
            created: None,
        }
    }

    /// Normalized directory of the page, falling back to the directory of `path`
    /// when `root` is empty.
    #[must_use]
    pub fn page_root(&self) -> String {
        if self.root.is_empty() {
            page_dir(&normalize_page_path(&self.path))
        } else {
            normalize_page_path(&self.root)
        }
    }
}

/// A page together with the paths it references directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShallowNode {
    pub name: String,
    /// Corpus-wide key.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub depth: usize,
    /// Referenced absolute paths in source order, duplicates kept.
    #[serde(default)]
    pub nested: Vec<String>,
}

impl ShallowNode {
    /// Top-level node for `record` with the given references.
    #[must_use]
    pub fn top_level(record: &RawFileRecord, nested: Vec<String>) -> Self {
        Self {
            name: record.name.clone(),
            path: normalize_page_path(&record.path),
            parent: None,
            depth: 0,
            nested,
        }
    }
}

/// Builds the shallow node collection from raw file records.
#[derive(Debug, Clone)]
pub struct ShallowGraphBuilder {
    extractor: ReferenceExtractor,
    concurrency: usize,
}

impl ShallowGraphBuilder {
    /// Create a builder reading at most `concurrency` pages at a time.
    #[must_use]
    pub fn new(extractor: ReferenceExtractor, concurrency: usize) -> Self {
        Self {
            extractor,
            concurrency: concurrency.max(1),
        }
    }

    /// Build the node for a page whose content is already in memory.
    #[must_use]
    pub fn build_node(&self, record: &RawFileRecord, content: &str) -> ShallowNode {
        let root = record.page_root();
        let nested = self.extractor.extract(content, &PageContext::new(&root));
        debug!("{} references {} page(s)", record.path, nested.len());
        ShallowNode::top_level(record, nested)
    }

    /// Read every record concurrently and return the sorted node collection.
    ///
    /// A page that cannot be read is logged and contributes a node with no
    /// references. The returned collection has one node per record.
    pub async fn build_all(&self, records: Vec<RawFileRecord>) -> Vec<ShallowNode> {
        info!("Extracting references from {} page(s)", records.len());

        let mut nodes: Vec<ShallowNode> = stream::iter(records.iter())
            .map(|record| async move {
                match fs::read(&record.path).await {
                    Ok(bytes) => self.build_node(record, &String::from_utf8_lossy(&bytes)),
                    Err(e) => {
                        warn!("Failed to read {}: {e}", record.path);
                        ShallowNode::top_level(record, Vec::new())
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        sort_by_path(&mut nodes);
        nodes
    }
}

/// Sort nodes by lower-cased path, exact path breaking ties.
pub fn sort_by_path(nodes: &mut [ShallowNode]) {
    nodes.sort_by_cached_key(|node| (node.path.to_lowercase(), node.path.clone()));
}
