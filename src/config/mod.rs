//! Configuration management for JSP Insights
//!
//! Two layers:
//!
//! - [`InsightsConfig`] - per-run settings read from `jsp-insights.toml`
//!   (stores directory, output directory, read concurrency)
//! - [`LayoutConfig`] - the corpus layout constants (store directory names,
//!   macro tokens, attribute spellings) handed to the path resolver at
//!   construction time
//!
//! Both deserialize with `#[serde(default)]`, so a configuration file only needs
//! to mention the values that differ from the legacy store layout.

mod insights;
mod layout;

pub use insights::InsightsConfig;
pub use layout::LayoutConfig;
