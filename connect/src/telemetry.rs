//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the JSON subscriber filtered by `RUST_LOG`.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
}
