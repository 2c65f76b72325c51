//! Configuration for the reconnection-events hook.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EventsConfig
// ---------------------------------------------------------------------------

/// Configuration for the reconnection-events collaborator.
///
/// When `enabled` is `false` (the default) the holder attaches no
/// reconnection listener to installed sessions, even if one was supplied
/// to the builder. `host` and `port` are carried for the events forwarder
/// that consumes this config; the holder itself only reads `enabled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Attach the reconnection listener to every installed session.
    pub enabled: bool,

    /// Address the events forwarder binds to.
    pub host: String,

    /// Port the events forwarder binds to.
    pub port: u16,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "127.0.0.1".to_string(),
            port: 24879,
        }
    }
}

impl EventsConfig {
    /// An enabled config with default host and port.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
