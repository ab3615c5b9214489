//! Core types shared by every layer of JSP Insights.
//!
//! The only thing living here today is error handling:
//! - [`InsightsError`] - enumerated failures of the surface around the engine
//! - [`ErrorContext`] - user-facing wrapper with details and suggestions
//! - [`user_friendly_error`] - conversion used by `main`

pub mod error;

pub use error::{ErrorContext, InsightsError, user_friendly_error};
