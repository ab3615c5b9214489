//! Integration test suite for JSP Insights
//!
//! End-to-end tests over real store trees written to temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **pipeline**: walk, shallow and deep resolution through the library API
//! - **determinism**: repeated runs produce byte-identical output
//! - **cli**: the `jsp-insights` binary, its output files and error reporting

mod cli;
mod common;
mod determinism;
mod pipeline;
