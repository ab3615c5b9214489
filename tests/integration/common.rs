//! Shared helpers for the integration tests.

use anyhow::Result;
use jsp_insights::config::LayoutConfig;
use jsp_insights::extractor::ReferenceExtractor;
use jsp_insights::graph::{DeepGraphResolver, DeepNode, ShallowGraphBuilder, ShallowNode};
use jsp_insights::resolver::PathResolver;
use jsp_insights::test_utils::CorpusFixture;
use jsp_insights::utils::page_path_from;
use jsp_insights::walker;

/// Walk `corpus` and run both resolution phases with the default layout.
pub async fn resolve(corpus: &CorpusFixture) -> Result<(Vec<ShallowNode>, Vec<DeepNode>)> {
    let layout = LayoutConfig::default();
    let records = walker::scan(corpus.stores_dir().to_path_buf(), layout.clone()).await?;

    let resolver = PathResolver::new(page_path_from(&corpus.content_root()), layout);
    let builder = ShallowGraphBuilder::new(ReferenceExtractor::new(resolver)?, 8);
    let shallow = builder.build_all(records).await;
    let deep = DeepGraphResolver::new(&shallow).resolve_all();
    Ok((shallow, deep))
}

/// The tree rooted at `path`.
pub fn tree<'a>(trees: &'a [DeepNode], path: &str) -> &'a DeepNode {
    trees
        .iter()
        .find(|tree| tree.path == path)
        .unwrap_or_else(|| panic!("no tree rooted at {path}"))
}

pub fn child_paths(node: &DeepNode) -> Vec<&str> {
    node.nested.iter().map(|child| child.path.as_str()).collect()
}
