//! Logging setup for the tagspan binary
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - every computed restyle range
//! - `RUST_LOG=tagspan::locator=debug` - module-level filtering
//! - `RUST_LOG=trace` - symbol scans, captured deltas and regex matches
//!
//! Output goes to stderr so it never mixes with rendered text.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the tracing subscriber. Defaults to `warn` without RUST_LOG.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    // A second init (e.g. from an embedding host) keeps the first subscriber
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
