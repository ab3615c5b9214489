//! Run configuration for JSP Insights.
//!
//! The configuration file (`jsp-insights.toml`) says where the store tree lives,
//! where output files go, how many pages are read concurrently, and which
//! layout constants the path resolver uses. Every field is optional; a missing
//! file means built-in defaults.
//!
//! # Location
//!
//! 1. `--config <file>` on the command line (must exist)
//! 2. `JSP_INSIGHTS_CONFIG` environment variable
//! 3. `jsp-insights.toml` in the current directory
//!
//! # File Format
//!
//! ```toml
//! stores_dir = "../WebCommerce/Stores"
//! output_dir = "processor-output"
//! max_concurrency = 32
//!
//! [layout]
//! default_store_dir = "companyGLOBALSAS"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use super::LayoutConfig;
use crate::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE, default_concurrency};
use crate::core::InsightsError;

/// Top-level configuration for a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Directory walked for template files.
    pub stores_dir: PathBuf,

    /// Content root that root-relative references resolve against.
    ///
    /// Defaults to `<stores_dir>/<layout.content_root_marker>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_root: Option<PathBuf>,

    /// Directory receiving `jsp.json`, `shallow.json` and `deep.json`.
    pub output_dir: PathBuf,

    /// Maximum number of page reads in flight during shallow resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,

    /// Layout constants for the path resolver.
    pub layout: LayoutConfig,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            stores_dir: PathBuf::from("../WebCommerce/Stores"),
            content_root: None,
            output_dir: PathBuf::from("processor-output"),
            max_concurrency: None,
            layout: LayoutConfig::default(),
        }
    }
}

impl InsightsConfig {
    /// Load configuration from an optional explicit path.
    ///
    /// An explicit path must exist. Without one, the default location is used if a
    /// file is present there, otherwise the built-in defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError::ConfigNotFound`] for a missing explicit path and
    /// [`InsightsError::ConfigParseError`] for invalid TOML.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(InsightsError::ConfigNotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                Self::load_from(&path).await
            }
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_from(&path).await
                } else {
                    tracing::debug!("No configuration at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let config = toml::from_str(&content).map_err(|e| InsightsError::ConfigParseError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default configuration file location.
    ///
    /// `JSP_INSIGHTS_CONFIG` wins over `./jsp-insights.toml`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
    }

    /// The configured content root, or `<stores_dir>/<marker>`.
    #[must_use]
    pub fn content_root(&self) -> PathBuf {
        self.content_root
            .clone()
            .unwrap_or_else(|| self.stores_dir.join(&self.layout.content_root_marker))
    }

    /// Effective read concurrency, never zero.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or_else(default_concurrency).max(1)
    }
}
