//! Shared helpers.
//!
//! - [`path`] - lexical normalization of page paths into the `/`-separated form
//!   used as the corpus-wide node key

pub mod path;

pub use path::{join_page_path, normalize_page_path, page_dir, page_path_from};
