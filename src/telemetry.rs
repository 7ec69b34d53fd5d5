//! Tracing setup for binaries and demos

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` (e.g. `"orchard=info"`).
///
/// Calling it twice is harmless; the second install is ignored.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
