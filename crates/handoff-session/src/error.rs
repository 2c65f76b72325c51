//! Error types for the session layer.

/// Errors a [`Session`](crate::Session) can report while tearing itself
/// down.
///
/// The holder never propagates these: a failed close is logged and the
/// slot is vacated anyway.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The underlying connection failed while closing.
    #[error("session i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// The session was already closed by someone else.
    #[error("session already closed")]
    AlreadyClosed,

    /// The session refused to close for an implementation-specific reason.
    #[error("session close failed: {0}")]
    Closed(String),
}
