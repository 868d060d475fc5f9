//! Log subscriber setup for the `riverstone` binary.
//!
//! Library crates only emit `tracing` events; the binary decides where they
//! go. Output goes to stderr so command results on stdout stay parseable.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Filter used when `RUST_LOG` is unset or unparsable. Per-hand engine
/// events stay quiet unless asked for.
pub const DEFAULT_FILTER: &str = "warn,riverstone_cli=info";

pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging() {
    let subscriber = fmt()
        .with_env_filter(default_filter())
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
