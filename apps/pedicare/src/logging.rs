//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `info`: server start, classification outcomes (levels only)
//! - `debug`: request details and simulation steps
//!
//! Questionnaire answers and growth measurements are never logged at
//! `info`. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "pedicare=info,tower_http=info";

/// Filter used with `-v`.
pub const VERBOSE_FILTER: &str = "pedicare=debug,pedicare_core=debug,tower_http=debug";

/// Build the filter for the requested verbosity.
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Logs go to stderr so stdout stays
/// parseable for `--json` output.
///
/// Calling this twice is harmless: the second call returns `false`.
pub fn init_logging(verbose: bool) -> bool {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose))
        .try_init()
        .is_ok()
}

// =============================================================================
// TESTS
// =============================================================================
