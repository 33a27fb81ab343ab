#![forbid(unsafe_code)]

//! JSON log output for production hosts.
//!
//! Only compiled with the `tracing-json` feature. Filtering follows
//! `RUST_LOG`; without it, uistack's own targets log at `info`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already set, in which case
/// the existing one is kept.
pub fn init_json() -> bool {
    init_json_with_filter(DEFAULT_FILTER)
}

/// Like [`init_json`], with a fallback filter used when `RUST_LOG` is unset
/// or invalid.
pub fn init_json_with_filter(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}
