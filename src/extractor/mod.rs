//! Inclusion reference extraction from raw page text.
//!
//! There is no parser for the legacy template dialect, so references are found
//! by scanning for attribute assignments whose quoted value names a template
//! file:
//!
//! ```text
//! <%@ include file="/include/Header.jspf" %>
//! <jsp:include page="${jspStoreDir}/Cart.jsp"/>
//! <c:import url='../common/Footer.jsp'/>
//! <jsp:param name="body" value="Body.jsp"/>
//! ```
//!
//! Values carrying one of the known non-file placeholders are skipped; every
//! remaining value is handed to the [`PathResolver`]. Output order is the order
//! in which the attributes appear in the text, regardless of spelling, and
//! duplicates are kept.

use regex::Regex;
use tracing::trace;

use crate::core::InsightsError;
use crate::resolver::{PageContext, PathResolver};

/// Scans page text for inclusion declarations and resolves them to page paths.
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    pattern: Option<Regex>,
    resolver: PathResolver,
}

impl ReferenceExtractor {
    /// Build an extractor using the attribute spellings, extensions and invalid
    /// placeholders of the resolver's layout.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError::InvalidPattern`] if the generated pattern does not
    /// compile.
    pub fn new(resolver: PathResolver) -> Result<Self, InsightsError> {
        let layout = resolver.layout();
        let pattern = if layout.reference_attributes.is_empty() || layout.extensions.is_empty() {
            None
        } else {
            let source = reference_pattern(&layout.reference_attributes, &layout.extensions);
            let regex = Regex::new(&source).map_err(|source_error| InsightsError::InvalidPattern {
                pattern: source.clone(),
                source: source_error,
            })?;
            Some(regex)
        };

        Ok(Self {
            pattern,
            resolver,
        })
    }

    /// The resolver used for every surviving value.
    #[must_use]
    pub const fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Raw attribute values naming a template file, in source order, with invalid
    /// placeholder forms removed.
    #[must_use]
    pub fn raw_references<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        pattern
            .captures_iter(text)
            .filter_map(|captures| captures.get(1).or_else(|| captures.get(2)))
            .map(|value| value.as_str())
            .filter(|value| {
                let valid = self.is_valid_reference(value);
                if !valid {
                    trace!("Skipping placeholder reference {value}");
                }
                valid
            })
            .collect()
    }

    /// Extract the ordered list of absolute page paths referenced by `text`.
    ///
    /// One-to-many macro expansions are flattened in place.
    #[must_use]
    pub fn extract(&self, text: &str, context: &PageContext<'_>) -> Vec<String> {
        self.raw_references(text)
            .into_iter()
            .flat_map(|raw| self.resolver.resolve(context, raw))
            .collect()
    }

    /// Whether `value` is free of the known non-file placeholder expressions.
    #[must_use]
    pub fn is_valid_reference(&self, value: &str) -> bool {
        !self
            .resolver
            .layout()
            .invalid_placeholders
            .iter()
            .any(|placeholder| !placeholder.is_empty() && value.contains(placeholder.as_str()))
    }
}

/// Build the combined attribute pattern.
///
/// Group 1 holds a double-quoted value, group 2 a single-quoted one.
fn reference_pattern(attributes: &[String], extensions: &[String]) -> String {
    let attributes = attributes.iter().map(|a| regex::escape(a)).collect::<Vec<_>>().join("|");
    let extensions = extensions.iter().map(|e| regex::escape(e)).collect::<Vec<_>>().join("|");
    format!(
        r#"(?:{attributes})\s*=\s*(?:"([^"\r\n]*?\.(?:{extensions}))\s*"|'([^'\r\n]*?\.(?:{extensions}))\s*')"#
    )
}
