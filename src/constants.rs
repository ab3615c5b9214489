//! Global constants used throughout the JSP Insights codebase.
//!
//! File names, environment variables and parallelism parameters that are
//! shared by several modules live here so they are discoverable in one place.

/// Name of the configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "jsp-insights.toml";

/// Environment variable that overrides the default configuration file location.
pub const CONFIG_PATH_ENV: &str = "JSP_INSIGHTS_CONFIG";

/// Output file holding the raw file records produced by the directory walk.
pub const RAW_OUTPUT_FILE: &str = "jsp.json";

/// Output file holding the shallow node collection.
pub const SHALLOW_OUTPUT_FILE: &str = "shallow.json";

/// Output file holding one deep tree per top-level page.
pub const DEEP_OUTPUT_FILE: &str = "deep.json";

/// Minimum number of concurrent page reads regardless of CPU count.
///
/// Page extraction is I/O-bound, so even single-core machines benefit from
/// keeping several reads in flight.
pub const MIN_PARALLELISM: usize = 10;

/// Multiplier applied to CPU core count for default read concurrency.
pub const PARALLELISM_CORE_MULTIPLIER: usize = 2;

/// Default CPU core count when detection fails.
///
/// Used as a fallback when `std::thread::available_parallelism()` returns an error.
pub const FALLBACK_CORE_COUNT: usize = 4;

/// Default read concurrency: `max(MIN_PARALLELISM, cores * PARALLELISM_CORE_MULTIPLIER)`.
pub fn default_concurrency() -> usize {
    let cores = std::thread::available_parallelism().map_or(FALLBACK_CORE_COUNT, usize::from);
    (cores * PARALLELISM_CORE_MULTIPLIER).max(MIN_PARALLELISM)
}
