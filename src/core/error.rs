//! Error handling for JSP Insights
//!
//! The resolution engine itself never fails: unreadable pages, unresolvable
//! references, lookup misses and cycles are all recorded in the graph instead of
//! being raised. The errors in this module belong to the surface around it:
//! configuration loading, the directory walk, writing output files, and the CLI.
//!
//! # Architecture
//!
//! - [`InsightsError`] - enumerated failure cases with the offending path or value
//! - [`ErrorContext`] - wrapper that adds user-friendly details and suggestions
//!
//! Use [`user_friendly_error`] to turn any `anyhow::Error` reaching `main` into an
//! [`ErrorContext`] for display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use jsp_insights::core::{ErrorContext, InsightsError};
//!
//! let context = ErrorContext::new(InsightsError::StoresDirNotFound {
//!     path: "../WebCommerce/Stores".to_string(),
//! })
//! .with_suggestion("Set `stores_dir` in jsp-insights.toml");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for JSP Insights operations.
///
/// Each variant names the file or value involved so the CLI can point the user at
/// the exact thing to fix.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was requested
        path: String,
    },

    /// The configuration file is not valid TOML or does not match the schema.
    #[error("Invalid configuration file syntax in {path}")]
    ConfigParseError {
        /// Path to the configuration file
        path: String,
        /// Parser message
        reason: String,
    },

    /// The stores directory to walk does not exist or is not a directory.
    #[error("Stores directory not found: {path}")]
    StoresDirNotFound {
        /// The directory that was expected to contain the template tree
        path: String,
    },

    /// A file system operation failed on a specific path.
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// What was being attempted ("read", "write", "walk", ...)
        operation: String,
        /// The path involved
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A page requested by path is not part of the scanned corpus.
    #[error("Page '{path}' is not part of the scanned corpus")]
    PageNotFound {
        /// The requested page path
        path: String,
    },

    /// A reference pattern built from the layout configuration failed to compile.
    #[error("Invalid reference pattern: {pattern}")]
    InvalidPattern {
        /// The pattern source
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Unknown output format requested on the command line.
    #[error("Unknown output format '{format}'")]
    InvalidFormat {
        /// The rejected format name
        format: String,
    },

    /// Output serialization failed.
    #[error("JSON serialization error")]
    JsonError(#[from] serde_json::Error),

    /// Generic I/O error without path context.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Any other failure, reported with its message as-is.
    #[error("{message}")]
    Other {
        /// Top-level error message
        message: String,
    },
}

/// Error wrapper carrying user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: InsightsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: InsightsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, shown in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error, shown in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error reaching the CLI boundary into an [`ErrorContext`].
///
/// [`InsightsError`] variants get tailored suggestions and permission-denied
/// I/O errors are recognized as well. Anything else is reported with its full
/// `anyhow` context chain as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    match error.downcast::<InsightsError>() {
        Ok(insights_error) => create_error_context(insights_error),
        Err(error) => {
            if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
                if io_error.kind() == std::io::ErrorKind::PermissionDenied {
                    return ErrorContext::new(InsightsError::IoError(std::io::Error::new(
                        io_error.kind(),
                        io_error.to_string(),
                    )))
                    .with_suggestion("Check file ownership and permissions of the stores and output directories");
                }
            }

            let chain = error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>();
            let context = ErrorContext::new(InsightsError::Other {
                message: error.to_string(),
            });
            if chain.is_empty() {
                context
            } else {
                context.with_details(chain.join(": "))
            }
        }
    }
}

fn create_error_context(error: InsightsError) -> ErrorContext {
    match &error {
        InsightsError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Check the --config path, or omit it to use built-in defaults"),
        InsightsError::ConfigParseError { reason, .. } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_details(reason)
                .with_suggestion("Check the TOML syntax and field names in your configuration file")
        }
        InsightsError::StoresDirNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Set `stores_dir` in jsp-insights.toml to the directory holding WebContent")
            .with_details("Relative paths are resolved against the current working directory"),
        InsightsError::PageNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass the absolute path as it appears in shallow.json")
            .with_details("Only .jsp and .jspf files under the stores directory are scanned"),
        InsightsError::InvalidFormat { .. } => {
            ErrorContext::new(error).with_suggestion("Use one of: tree, json")
        }
        InsightsError::FileSystemError { source, .. } => {
            let details = source.to_string();
            ErrorContext::new(error).with_details(details)
        }
        _ => ErrorContext::new(error),
    }
}
