//! Inclusion graph construction.
//!
//! Resolution runs in two phases:
//!
//! 1. [`shallow`] - every page is read once and reduced to a [`ShallowNode`]
//!    holding the paths it references directly. Reads run concurrently; the
//!    phase completes before the next one starts.
//! 2. [`deep`] - every shallow node is expanded depth-first into a tree of
//!    [`DeepNode`] occurrences. Cycles are cut at the first repeated page on the
//!    active ancestor chain and marked with a [`CircularMarker`].
//!
//! [`inspect`] holds read-only queries over the resulting trees.

pub mod deep;
pub mod inspect;
pub mod shallow;

pub use deep::{CircularMarker, DeepGraphResolver, DeepNode, IncludedBy};
pub use inspect::{GraphSummary, Occurrence};
pub use shallow::{RawFileRecord, ShallowGraphBuilder, ShallowNode, sort_by_path};
