//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::HandoffError;

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info";

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once: if a global subscriber is already set the
/// call does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Installs a `fmt` subscriber with an explicit filter directive.
///
/// # Errors
/// [`HandoffError::Tracing`] if the directive does not parse or a global
/// subscriber is already installed.
pub fn try_init_tracing(directive: &str) -> Result<(), HandoffError> {
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| HandoffError::Tracing(e.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| HandoffError::Tracing(e.to_string()))
}
