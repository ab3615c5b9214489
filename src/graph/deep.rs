//! Transitive expansion of shallow nodes into inclusion trees.
//!
//! Every shallow node becomes the root of its own tree. Children are looked up
//! by exact path in the whole corpus and copied into the tree with a parent and
//! depth specific to that occurrence, so a page included from several places
//! appears once per place.
//!
//! # Cycles
//!
//! While a node is expanded, the paths from the tree root down to it form the
//! active ancestor chain. A child whose path appears among the strict ancestors
//! of that node (the chain without the node's own entry) is not expanded again:
//! it is emitted with an empty `nested` list, its references are kept in
//! `raw_nested`, and a [`CircularMarker`] records where the page first appeared
//! on the chain and which node re-introduced it. A page that includes itself is
//! therefore expanded once more before it is cut.
//!
//! ```text
//! A -> [B, C], B -> [A]
//!
//! A (0)
//! ├── B (1)
//! │   └── A (2)  circular: first included at 0, last included by B at 1
//! └── C (1)
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

use super::shallow::ShallowNode;
use crate::core::InsightsError;

/// One occurrence of a page inside an inclusion tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepNode {
    pub name: String,
    pub path: String,
    /// Path of the including node in this tree, absent at the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub depth: usize,
    #[serde(default)]
    pub nested: Vec<DeepNode>,
    /// Unexpanded references of a circular occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_nested: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circular: Option<CircularMarker>,
}

impl DeepNode {
    fn occurrence(node: &ShallowNode, parent: Option<&str>, depth: usize) -> Self {
        Self {
            name: node.name.clone(),
            path: node.path.clone(),
            parent: parent.map(str::to_string),
            depth,
            nested: Vec::new(),
            raw_nested: None,
            circular: None,
        }
    }

    /// Whether this occurrence was truncated because of a cycle.
    #[must_use]
    pub const fn is_circular(&self) -> bool {
        self.circular.is_some()
    }
}

/// Marks an occurrence whose page was already on the active ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularMarker {
    /// Position on the chain (0 = tree root) where the page first appeared.
    pub first_included_depth: usize,
    /// The node whose reference closed the cycle.
    pub last_included_by: IncludedBy,
}

/// Path and depth of the node that re-introduced a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludedBy {
    pub path: String,
    pub depth: usize,
}

/// Expands shallow nodes into deep trees over an immutable corpus snapshot.
#[derive(Debug)]
pub struct DeepGraphResolver<'a> {
    nodes: &'a [ShallowNode],
    index: HashMap<&'a str, usize>,
}

impl<'a> DeepGraphResolver<'a> {
    /// Index `nodes` by path. When a path occurs more than once the first node
    /// wins.
    #[must_use]
    pub fn new(nodes: &'a [ShallowNode]) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            index.entry(node.path.as_str()).or_insert(position);
        }
        if index.len() != nodes.len() {
            debug!("{} duplicate page path(s) in corpus", nodes.len() - index.len());
        }

        Self {
            nodes,
            index,
        }
    }

    /// Shallow node for `path`, if it is part of the corpus.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&'a ShallowNode> {
        self.index.get(path).map(|&position| &self.nodes[position])
    }

    /// One tree per shallow node, in corpus order.
    #[must_use]
    pub fn resolve_all(&self) -> Vec<DeepNode> {
        self.nodes.iter().map(|node| self.expand_root(node)).collect()
    }

    /// The tree rooted at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError::PageNotFound`] if no shallow node has this path.
    pub fn resolve_one(&self, path: &str) -> Result<DeepNode, InsightsError> {
        self.lookup(path).map(|node| self.expand_root(node)).ok_or_else(|| {
            InsightsError::PageNotFound {
                path: path.to_string(),
            }
        })
    }

    fn expand_root(&self, node: &'a ShallowNode) -> DeepNode {
        let mut chain = vec![node.path.as_str()];
        let mut root = DeepNode::occurrence(node, None, 0);
        root.nested = self.expand_children(node, 0, &mut chain);
        root
    }

    /// Children of `node`, which sits at `depth` and is the last entry of `chain`.
    fn expand_children(
        &self,
        node: &'a ShallowNode,
        depth: usize,
        chain: &mut Vec<&'a str>,
    ) -> Vec<DeepNode> {
        let mut children = Vec::with_capacity(node.nested.len());

        for reference in &node.nested {
            let Some(target) = self.lookup(reference) else {
                trace!("{} references {reference}, which is not in the corpus", node.path);
                continue;
            };

            let mut child = DeepNode::occurrence(target, Some(node.path.as_str()), depth + 1);

            let ancestors = &chain[..chain.len().saturating_sub(1)];
            if let Some(first) = ancestors.iter().position(|ancestor| *ancestor == target.path) {
                child.raw_nested = Some(target.nested.clone());
                child.circular = Some(CircularMarker {
                    first_included_depth: first,
                    last_included_by: IncludedBy {
                        path: node.path.clone(),
                        depth,
                    },
                });
            } else if !target.nested.is_empty() {
                chain.push(&target.path);
                child.nested = self.expand_children(target, depth + 1, chain);
                chain.pop();
            }

            children.push(child);
        }

        children
    }
}
