//! Unified error type for the Handoff facade.

use handoff_session::SessionError;

/// Top-level error for everything the facade can fail at.
///
/// The holder itself never fails; these come from the edges: loading
/// configuration, installing the log subscriber, or a session reporting a
/// problem to code that chose to propagate it.
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    /// A session-level error (close failure, already closed).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Reading a configuration file failed.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file was not valid JSON for the expected shape.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed.
    #[error("failed to install tracing subscriber: {0}")]
    Tracing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_session_error() {
        let err = SessionError::AlreadyClosed;
        let handoff_err: HandoffError = err.into();
        assert!(matches!(handoff_err, HandoffError::Session(_)));
        assert_eq!(handoff_err.to_string(), "session already closed");
    }

    #[test]
    fn test_from_io_error() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let handoff_err: HandoffError = err.into();
        assert!(matches!(handoff_err, HandoffError::Io(_)));
        assert!(handoff_err.to_string().contains("missing"));
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u16>("nope").unwrap_err();
        let handoff_err: HandoffError = err.into();
        assert!(matches!(handoff_err, HandoffError::Config(_)));
    }
}
