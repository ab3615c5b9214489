//! Corpus layout constants consumed by the path resolver and reference extractor.
//!
//! The legacy store tree hard-codes a number of directory names and template
//! macro tokens. They are kept here as plain data so the resolver can be built
//! against any layout, and so tests can use a small synthetic one.
//!
//! ```toml
//! [layout]
//! content_root_marker = "WebContent"
//! default_store_dir = "companyGLOBALSAS"
//! store_variants = ["companyUSStorefrontAssetStore", "companyCAStorefrontAssetStore"]
//! ```

use serde::{Deserialize, Serialize};

/// Immutable layout data describing how references map onto the store tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Directory name that marks the content root inside every page path.
    ///
    /// The store directory of a page is the path segment directly after it.
    pub content_root_marker: String,

    /// Literal substrings that identify a reference pointing into a named store.
    ///
    /// Such references are rooted at the content root after stripping any
    /// leading `../` traversal.
    pub cross_store_markers: Vec<String>,

    /// Macro token for the shared style directory.
    pub style_dir_token: String,

    /// Path of the style directory relative to the content root.
    pub style_dir_path: String,

    /// Macro token for the store directory of the including page.
    pub store_dir_token: String,

    /// Macro token that stands for every storefront variant at once.
    pub multi_store_token: String,

    /// Store directories substituted for [`multi_store_token`](Self::multi_store_token),
    /// in output order.
    pub store_variants: Vec<String>,

    /// Store directory names recognized when deriving a page's own store.
    pub known_store_dirs: Vec<String>,

    /// Store directory used when a page does not live under a known store.
    pub default_store_dir: String,

    /// Attribute names whose values declare an inclusion.
    pub reference_attributes: Vec<String>,

    /// Template file extensions, without the leading dot.
    pub extensions: Vec<String>,

    /// Embedded expressions that mark a value as not being a real file reference.
    pub invalid_placeholders: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            content_root_marker: "WebContent".to_string(),
            cross_store_markers: strings(&[
                "CABC",
                "companyCABCCatalogAssetStore",
                "companyCABCStorefrontAssetStore",
                "companyCAStorefrontAssetStore",
                "companyGLOBALSAS",
                "companyUSBCCatalogAssetStore",
                "companyUSBCStorefrontAssetStore",
                "companyUSStorefrontAssetStore",
                "USBC",
            ]),
            style_dir_token: "${StyleDir}".to_string(),
            style_dir_path: "companyGLOBALSAS/include/styles/style1".to_string(),
            store_dir_token: "${jspStoreDir}".to_string(),
            multi_store_token: "${jspEsitesStoreDir}".to_string(),
            store_variants: strings(&[
                "companyUSStorefrontAssetStore",
                "companyCAStorefrontAssetStore",
                "companyUSBCCatalogAssetStore",
                "companyCABCCatalogAssetStore",
            ]),
            known_store_dirs: strings(&[
                "CABC",
                "USBC",
                "companyCABCCatalogAssetStore",
                "companyCABCStorefrontAssetStore",
                "companyCAStorefrontAssetStore",
                "companyUSBCCatalogAssetStore",
                "companyUSBCStorefrontAssetStore",
                "companyUSStorefrontAssetStore",
                "companyGLOBALSAS",
            ]),
            default_store_dir: "companyGLOBALSAS".to_string(),
            reference_attributes: strings(&["file", "url", "page", "value"]),
            extensions: strings(&["jsp", "jspf"]),
            invalid_placeholders: strings(&[
                "${richMediaFileParam}",
                "${element.elementInnerContent.objectId}",
                "${jsp_name}",
            ]),
        }
    }
}

impl LayoutConfig {
    /// Whether `name` has one of the template extensions (case-insensitive).
    #[must_use]
    pub fn is_template_file(&self, name: &str) -> bool {
        name.rsplit_once('.').is_some_and(|(_, ext)| {
            self.extensions.iter().any(|known| known.eq_ignore_ascii_case(ext))
        })
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
