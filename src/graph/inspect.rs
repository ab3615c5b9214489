//! Read-only queries over resolved inclusion trees.

use serde::Serialize;
use std::fmt;

use super::deep::DeepNode;
use super::shallow::ShallowNode;

/// Whether `node` or any of its descendants was truncated by a cycle.
#[must_use]
pub fn has_circular(node: &DeepNode) -> bool {
    node.is_circular() || node.nested.iter().any(has_circular)
}

/// Number of occurrences in the tree, the root included.
#[must_use]
pub fn occurrence_count(node: &DeepNode) -> usize {
    1 + node.nested.iter().map(occurrence_count).sum::<usize>()
}

/// Depth of the deepest occurrence in the tree.
#[must_use]
pub fn max_depth(node: &DeepNode) -> usize {
    node.nested.iter().map(max_depth).max().unwrap_or(node.depth)
}

/// A single page occurrence, flattened out of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub path: &'a str,
    pub parent: Option<&'a str>,
    pub depth: usize,
    pub circular: bool,
}

/// Pre-order list of every occurrence in the tree.
#[must_use]
pub fn flatten(node: &DeepNode) -> Vec<Occurrence<'_>> {
    let mut occurrences = Vec::new();
    collect(node, &mut occurrences);
    occurrences
}

fn collect<'a>(node: &'a DeepNode, out: &mut Vec<Occurrence<'a>>) {
    out.push(Occurrence {
        path: &node.path,
        parent: node.parent.as_deref(),
        depth: node.depth,
        circular: node.is_circular(),
    });
    for child in &node.nested {
        collect(child, out);
    }
}

/// Every place `path` occurs below a tree root, across all trees.
///
/// Roots themselves are not reported, so an empty result means no other page
/// reaches `path`.
#[must_use]
pub fn included_from<'a>(trees: &'a [DeepNode], path: &str) -> Vec<Occurrence<'a>> {
    trees
        .iter()
        .flat_map(|tree| flatten(tree).into_iter().skip(1))
        .filter(|occurrence| occurrence.path == path)
        .collect()
}

/// Totals over a shallow corpus and its deep trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    /// Pages in the corpus.
    pub pages: usize,
    /// Direct references across all pages, duplicates counted.
    pub references: usize,
    /// References that do not name a page in the corpus.
    pub unresolved: usize,
    /// Trees containing at least one circular occurrence.
    pub circular_trees: usize,
    /// Occurrences across all trees.
    pub occurrences: usize,
    pub max_depth: usize,
}

impl GraphSummary {
    #[must_use]
    pub fn from_graph(shallow: &[ShallowNode], deep: &[DeepNode]) -> Self {
        let known: std::collections::HashSet<&str> =
            shallow.iter().map(|node| node.path.as_str()).collect();

        let references = shallow.iter().map(|node| node.nested.len()).sum();
        let unresolved = shallow
            .iter()
            .flat_map(|node| &node.nested)
            .filter(|reference| !known.contains(reference.as_str()))
            .count();

        Self {
            pages: shallow.len(),
            references,
            unresolved,
            circular_trees: deep.iter().filter(|tree| has_circular(tree)).count(),
            occurrences: deep.iter().map(occurrence_count).sum(),
            max_depth: deep.iter().map(max_depth).max().unwrap_or(0),
        }
    }
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages, {} references ({} unresolved), {} circular trees, {} occurrences, max depth {}",
            self.pages,
            self.references,
            self.unresolved,
            self.circular_trees,
            self.occurrences,
            self.max_depth
        )
    }
}
