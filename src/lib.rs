//! JSP Insights - inclusion-graph resolution for legacy JSP store trees
//!
//! A store tree holds thousands of `.jsp` and `.jspf` pages that include one
//! another through `<%@ include file=... %>`, `<jsp:include page=...>`,
//! `<c:import url=...>` and `value=` parameters, often behind macro tokens such
//! as `${jspStoreDir}`. This crate turns the flat file listing into a
//! cycle-safe inclusion graph so that unused pages can be found and retired.
//!
//! # Pipeline
//!
//! ```text
//! walker ──> RawFileRecord ──> ShallowGraphBuilder ──> ShallowNode ──> DeepGraphResolver ──> DeepNode
//!                                 │
//!                                 └── ReferenceExtractor ──> PathResolver
//! ```
//!
//! - [`walker`] - discovers template files under the stores directory
//! - [`resolver`] - turns raw, possibly templated references into page paths
//! - [`extractor`] - finds inclusion declarations in page text
//! - [`graph`] - shallow and deep resolution, cycle marking, tree queries
//! - [`output`] - JSON output files and text tree rendering
//!
//! ## Supporting Modules
//!
//! - [`cli`] - the `jsp-insights` command-line interface
//! - [`config`] - `jsp-insights.toml` and the corpus layout constants
//! - [`core`] - error types and user-facing error context
//! - [`constants`] - shared file names and defaults
//! - [`utils`] - lexical page path helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use jsp_insights::config::LayoutConfig;
//! use jsp_insights::extractor::ReferenceExtractor;
//! use jsp_insights::graph::{DeepGraphResolver, RawFileRecord, ShallowGraphBuilder};
//! use jsp_insights::resolver::PathResolver;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let resolver = PathResolver::new("/srv/Stores/WebContent", LayoutConfig::default());
//! let builder = ShallowGraphBuilder::new(ReferenceExtractor::new(resolver)?, 16);
//!
//! let records = vec![RawFileRecord::from_path("/srv/Stores/WebContent/USBC/Cart.jsp")];
//! let shallow = builder.build_all(records).await;
//! let trees = DeepGraphResolver::new(&shallow).resolve_all();
//! println!("{}", serde_json::to_string_pretty(&trees)?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod extractor;
pub mod graph;
pub mod output;
pub mod resolver;
pub mod utils;
pub mod walker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
