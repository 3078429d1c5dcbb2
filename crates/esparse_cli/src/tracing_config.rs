//! Tracing subscriber setup for the `esparse` binary.
//!
//! The subscriber is installed only when `ESPARSE_LOG` (or `RUST_LOG`) is
//! set. Both use the usual filter syntax:
//!
//! ```bash
//! ESPARSE_LOG=debug esparse file.js
//! ESPARSE_LOG="esparse_parser=trace" esparse --module file.mjs
//! ```

use tracing_subscriber::EnvFilter;

const LOG_VAR: &str = "ESPARSE_LOG";

/// Build an `EnvFilter` from `ESPARSE_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_VAR) {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global fmt subscriber writing to stderr.
///
/// Does nothing when neither variable is set, so stdout only ever carries
/// the JSON output.
pub fn init_tracing() {
    if std::env::var_os(LOG_VAR).is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .init();
}
