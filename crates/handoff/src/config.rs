//! Loading configuration from disk.

use std::path::Path;

use handoff_session::EventsConfig;

use crate::HandoffError;

/// Reads an [`EventsConfig`] from a JSON file.
///
/// Fields missing from the file take their defaults, so `{}` yields a
/// disabled config.
pub fn load_events_config(path: impl AsRef<Path>) -> Result<EventsConfig, HandoffError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let config = EventsConfig::from_json(&raw)?;
    tracing::debug!(path = %path.display(), enabled = config.enabled, "loaded events config");
    Ok(config)
}
