//! Test utilities for JSP Insights
//!
//! Helpers for unit and integration tests: one-time logging setup and an
//! on-disk store tree builder.
//!
//! # Example
//!
//! ```rust,no_run
//! use jsp_insights::test_utils::CorpusFixture;
//!
//! let corpus = CorpusFixture::new().unwrap();
//! corpus.add_page("USBC/Cart.jsp", r#"<%@ include file="Header.jspf" %>"#).unwrap();
//! corpus.add_page("USBC/Header.jspf", "").unwrap();
//!
//! let config = corpus.config();
//! assert!(config.stores_dir.ends_with("Stores"));
//! ```

pub mod fixtures;

pub use fixtures::CorpusFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=jsp_insights=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
