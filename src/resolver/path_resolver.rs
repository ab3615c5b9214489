//! Resolution of raw inclusion strings into absolute page paths.
//!
//! A raw reference such as `${jspStoreDir}/include/Header.jspf` only becomes a
//! page path once the macro tokens are substituted and the result is anchored
//! somewhere in the store tree. The rules are checked in a fixed order and the
//! first match wins:
//!
//! 1. the string names a store directory (cross-store marker) - rooted at the
//!    content root, everything up to the last `../` dropped
//! 2. style directory token - replaced by the style directory under the content root
//! 3. store directory token - replaced by the including page's own store directory
//! 4. leading separator - relative to the content root
//! 5. anything else - relative to the including page's directory
//!
//! The multi-store token is expanded first, producing one candidate per
//! storefront variant; each candidate then goes through the same rules.
//! Unknown tokens are left in place and fall through to rule 5.

use crate::config::LayoutConfig;
use crate::utils::{join_page_path, normalize_page_path};

/// Location of the page whose text contains the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext<'a> {
    /// Normalized directory containing the including page.
    pub root: &'a str,
}

impl<'a> PageContext<'a> {
    /// Context for a page living in `root`.
    #[must_use]
    pub const fn new(root: &'a str) -> Self {
        Self {
            root,
        }
    }
}

/// Pure resolver from raw reference strings to normalized absolute paths.
#[derive(Debug, Clone)]
pub struct PathResolver {
    content_root: String,
    layout: LayoutConfig,
}

impl PathResolver {
    /// Build a resolver for a corpus whose content root is `content_root`.
    pub fn new(content_root: impl AsRef<str>, layout: LayoutConfig) -> Self {
        Self {
            content_root: normalize_page_path(content_root.as_ref()),
            layout,
        }
    }

    /// Normalized content root.
    #[must_use]
    pub fn content_root(&self) -> &str {
        &self.content_root
    }

    /// Layout constants in use.
    #[must_use]
    pub const fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Resolve `raw` as written in a page located by `context`.
    ///
    /// Returns one path, or one path per storefront variant when `raw` carries the
    /// multi-store token.
    #[must_use]
    pub fn resolve(&self, context: &PageContext<'_>, raw: &str) -> Vec<String> {
        let raw = raw.trim();
        match after_token(raw, &self.layout.multi_store_token) {
            Some(rest) => self
                .layout
                .store_variants
                .iter()
                .map(|variant| self.apply_rules(context, &format!("{variant}/{rest}")))
                .collect(),
            None => vec![self.apply_rules(context, raw)],
        }
    }

    fn apply_rules(&self, context: &PageContext<'_>, raw: &str) -> String {
        if self.names_store(raw) {
            let tail = raw.rsplit_once("../").map_or(raw, |(_, tail)| tail);
            return join_page_path(&self.content_root, tail);
        }

        if let Some(rest) = after_token(raw, &self.layout.style_dir_token) {
            let style_dir = join_page_path(&self.content_root, &self.layout.style_dir_path);
            return join_page_path(&style_dir, rest);
        }

        if let Some(rest) = after_token(raw, &self.layout.store_dir_token) {
            let store_dir = join_page_path(&self.content_root, self.store_dir_of(context.root));
            return join_page_path(&store_dir, rest);
        }

        if raw.starts_with(['/', '\\']) {
            return join_page_path(&self.content_root, raw);
        }

        join_page_path(context.root, raw)
    }

    fn names_store(&self, raw: &str) -> bool {
        self.layout.cross_store_markers.iter().any(|marker| !marker.is_empty() && raw.contains(marker.as_str()))
    }

    /// Store directory of a page located in `root`.
    ///
    /// This is the segment directly after the content-root marker when it is a
    /// known store directory, otherwise the default store directory.
    #[must_use]
    pub fn store_dir_of<'s>(&'s self, root: &'s str) -> &'s str {
        let normalized = root.trim_end_matches('/');
        let mut segments = normalized.split(['/', '\\']);
        let candidate = segments
            .by_ref()
            .position(|segment| segment == self.layout.content_root_marker)
            .and_then(|_| segments.next());

        match candidate {
            Some(dir) if self.layout.known_store_dirs.iter().any(|known| known == dir) => dir,
            _ => &self.layout.default_store_dir,
        }
    }
}

/// Text following the first occurrence of `token`, if the token is present.
fn after_token<'a>(raw: &'a str, token: &str) -> Option<&'a str> {
    if token.is_empty() {
        return None;
    }
    raw.split_once(token).map(|(_, rest)| rest)
}
