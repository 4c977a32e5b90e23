// =============================================================================
// Logging
// =============================================================================
//
// The indicator functions only emit `tracing` events; installing a subscriber
// is left to whatever binary or batch job drives them.  `init_tracing` is the
// stock setup: formatted output filtered by `RUST_LOG`, falling back to the
// supplied directive.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber filtered by `RUST_LOG`, or by
/// `default_directive` (e.g. `"info"`, `"algotrader_indicators=debug"`) when
/// the variable is unset or invalid.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| anyhow!("invalid log directive `{default_directive}`: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
