//! Development-time tracing for debugging flowrun.
//!
//! Diagnostics only, controlled by `RUST_LOG` and written to stderr.
//! Product output (flow names, captured script output) goes to stdout and
//! is unaffected.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber: `RUST_LOG` filter (default `warn`),
/// compact format on stderr.
///
/// ```bash
/// RUST_LOG=flowrun=debug cargo run -- run deploy
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
