//! Path resolution for inclusion references.
//!
//! See [`path_resolver`] for the substitution rules and their precedence.

pub mod path_resolver;

pub use path_resolver::{PageContext, PathResolver};
